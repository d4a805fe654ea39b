use crate::utils::error::{Result, SetupError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Deletes `dir` recursively if it exists, then recreates it empty.
/// A symlink to a directory is kept and the directory it points to is emptied.
pub fn clean_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            if fs::symlink_metadata(dir)?.file_type().is_symlink() {
                tracing::debug!("Emptying symlinked directory {}", dir.display());
                return empty_dir(dir);
            }
            tracing::debug!("Removing existing directory {}", dir.display());
            fs::remove_dir_all(dir)?;
        }
        Ok(_) => {
            return Err(SetupError::IoError(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", dir.display()),
            )));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    mkdirs(dir)
}

fn empty_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

pub fn mkdirs(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Absolute form of `path` with its longest existing prefix canonicalized.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(canonical) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(canonical, |acc: PathBuf, part| acc.join(part)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_owned());
                        existing = parent;
                    }
                    _ => return Ok(absolute),
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Whether `child` resolves to `parent` or somewhere below it. `parent` need not exist.
pub fn is_within(child: &Path, parent: &Path) -> Result<bool> {
    let child = resolve(child)?;
    let parent = resolve(parent)?;
    Ok(child.starts_with(parent))
}
