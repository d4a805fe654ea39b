use crate::utils::error::{Result, SetupError};
use crate::utils::fs::is_within;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_str = path.to_string_lossy();

    if as_str.is_empty() {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_str.contains('\0') {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Rejects `/`, `C:\` and friends, as well as the working directory and its ancestors:
/// the install directory gets wiped on every run.
pub fn validate_not_root(field_name: &str, path: &Path) -> Result<()> {
    let only_root = path
        .components()
        .all(|c| matches!(c, Component::RootDir | Component::Prefix(_)));

    if only_root {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Refusing to use a filesystem root".to_string(),
        });
    }

    let cwd = std::env::current_dir()?;
    if is_within(&cwd, path)? {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Refusing to use the working directory or one of its parents".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[PathBuf],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<String> = allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_lowercase())
        .collect();

    for file in files {
        if let Some(extension) = file.extension().and_then(|ext| ext.to_str()) {
            if !allowed_set.contains(&extension.to_ascii_lowercase()) {
                return Err(SetupError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.display().to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(SetupError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.display().to_string(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SetupError::MissingConfigError {
        field: field_name.to_string(),
    })
}
