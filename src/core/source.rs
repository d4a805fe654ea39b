use crate::domain::ports::PluginSource;
use crate::utils::error::{Result, SetupError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Plugin archives given explicitly, plus every `*.jar` directly inside the plugin directories.
#[derive(Debug, Clone, Default)]
pub struct LaunchSource {
    plugins: Vec<PathBuf>,
    plugin_dirs: Vec<PathBuf>,
}

impl LaunchSource {
    pub fn new(plugins: Vec<PathBuf>, plugin_dirs: Vec<PathBuf>) -> Self {
        Self {
            plugins,
            plugin_dirs,
        }
    }

    pub fn add_plugin(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.plugins.push(path.into());
        self
    }

    pub fn add_plugin_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.plugin_dirs.push(path.into());
        self
    }

    pub fn plugins(&self) -> &[PathBuf] {
        &self.plugins
    }

    pub fn plugin_dirs(&self) -> &[PathBuf] {
        &self.plugin_dirs
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty() && self.plugin_dirs.is_empty()
    }
}

fn is_jar(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"))
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SetupError::SourceNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut jars = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_jar(&path) {
            jars.push(path);
        }
    }
    jars.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!("Found {} jar(s) in {}", jars.len(), dir.display());
    Ok(jars)
}

impl PluginSource for LaunchSource {
    fn resolved_files(&self) -> Result<Vec<PathBuf>> {
        let mut candidates = Vec::new();

        for plugin in &self.plugins {
            if !plugin.is_file() {
                return Err(SetupError::SourceNotFound {
                    path: plugin.display().to_string(),
                });
            }
            candidates.push(plugin.clone());
        }

        for dir in &self.plugin_dirs {
            candidates.extend(scan_dir(dir)?);
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(candidates.len());
        for path in candidates {
            if seen.insert(fs::canonicalize(&path)?) {
                resolved.push(path);
            } else {
                tracing::debug!("Skipping duplicate plugin path {}", path.display());
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_plugins_come_before_directory_scan() {
        let temp = TempDir::new().unwrap();
        let libs = temp.path().join("libs");
        fs::create_dir_all(libs.join("nested")).unwrap();
        fs::write(libs.join("b.jar"), b"b").unwrap();
        fs::write(libs.join("a.JAR"), b"a").unwrap();
        fs::write(libs.join("notes.txt"), b"ignored").unwrap();
        fs::write(libs.join("nested/c.jar"), b"not scanned").unwrap();
        let explicit = temp.path().join("z.jar");
        fs::write(&explicit, b"z").unwrap();

        let source = LaunchSource::new(vec![explicit.clone()], vec![libs.clone()]);
        let files = source.resolved_files().unwrap();

        assert_eq!(files, vec![explicit, libs.join("a.JAR"), libs.join("b.jar")]);
    }

    #[test]
    fn test_same_file_is_resolved_once() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("a.jar");
        fs::write(&jar, b"a").unwrap();

        let mut source = LaunchSource::default();
        source
            .add_plugin(&jar)
            .add_plugin(temp.path().join(".").join("a.jar"))
            .add_plugin_dir(temp.path());

        assert_eq!(source.resolved_files().unwrap(), vec![jar]);
    }

    #[test]
    fn test_missing_inputs_are_reported() {
        let temp = TempDir::new().unwrap();

        let missing_file = LaunchSource::new(vec![temp.path().join("gone.jar")], vec![]);
        assert!(matches!(
            missing_file.resolved_files(),
            Err(SetupError::SourceNotFound { .. })
        ));

        let missing_dir = LaunchSource::new(vec![], vec![temp.path().join("nowhere")]);
        assert!(matches!(
            missing_dir.resolved_files(),
            Err(SetupError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_directory_is_not_a_plugin() {
        let temp = TempDir::new().unwrap();
        let source = LaunchSource::new(vec![temp.path().to_path_buf()], vec![]);
        assert!(source.resolved_files().is_err());
    }
}
