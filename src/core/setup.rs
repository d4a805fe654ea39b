use crate::core::manifest::read_bundle;
use crate::domain::model::{InstallReport, InstalledPlugin, PlannedCopy};
use crate::domain::ports::PluginSource;
use crate::utils::error::{Result, SetupError};
use crate::utils::fs::{clean_dir, is_within, mkdirs};
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PLUGINS_DIR: &str = "plugins";

/// Copies a set of OSGi plugins into `<install_dir>/plugins` so they can be
/// launched as an Equinox application.
pub struct SetupTask<S: PluginSource> {
    source: S,
    install_dir: PathBuf,
}

impl<S: PluginSource> SetupTask<S> {
    pub fn new(source: S, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            install_dir: install_dir.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.install_dir.join(PLUGINS_DIR)
    }

    /// Resolves and parses every input without touching the install directory.
    pub fn plan(&self) -> Result<Vec<PlannedCopy>> {
        let files = self.source.resolved_files()?;
        tracing::debug!("Resolved {} plugin file(s)", files.len());

        let plugins_dir = self.plugins_dir();
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();
        let mut planned = Vec::with_capacity(files.len());

        for file in files {
            if is_within(&file, &self.install_dir)? {
                return Err(SetupError::SourceInsideInstallDir {
                    path: file.display().to_string(),
                    install_dir: self.install_dir.display().to_string(),
                });
            }

            let bundle = read_bundle(&file)?;
            let file_name = bundle.file_name();

            if let Some(first) = claimed.get(&file_name) {
                return Err(SetupError::DuplicateBundle {
                    file_name,
                    first: first.display().to_string(),
                    second: file.display().to_string(),
                });
            }
            claimed.insert(file_name.clone(), file.clone());

            tracing::debug!("{} -> {}", file.display(), file_name);
            planned.push(PlannedCopy {
                source: file,
                target: plugins_dir.join(&file_name),
                bundle,
            });
        }

        Ok(planned)
    }

    /// Cleans the install directory and copies every plugin under its `<name>_<version>.jar` name.
    pub fn copy_files(&self) -> Result<InstallReport> {
        let planned = self.plan()?;

        clean_dir(&self.install_dir)?;
        let plugins_dir = self.plugins_dir();
        mkdirs(&plugins_dir)?;

        let mut plugins = Vec::with_capacity(planned.len());
        for copy in planned {
            let bytes = fs::copy(&copy.source, &copy.target)?;
            tracing::debug!("Copied {} ({} bytes)", copy.target.display(), bytes);

            plugins.push(InstalledPlugin {
                source: copy.source,
                target: copy.target,
                symbolic_name: copy.bundle.symbolic_name,
                version: copy.bundle.version,
                is_source: copy.bundle.is_source,
                bytes,
            });
        }

        tracing::info!(
            "Installed {} plugin(s) into {}",
            plugins.len(),
            plugins_dir.display()
        );

        Ok(InstallReport {
            install_dir: self.install_dir.clone(),
            plugins_dir,
            plugins,
            completed_at: Utc::now(),
        })
    }
}

impl InstallReport {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                mkdirs(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn total_bytes(&self) -> u64 {
        self.plugins.iter().map(|p| p.bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_bundle(dir: &Path, file: &str, name: &str, version: &str) -> PathBuf {
        let path = dir.join(file);
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
            .unwrap();
        write!(
            zip,
            "Manifest-Version: 1.0\r\nBundle-SymbolicName: {}\r\nBundle-Version: {}\r\n\r\n",
            name, version
        )
        .unwrap();
        zip.start_file("payload.bin", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(file.as_bytes()).unwrap();
        zip.finish().unwrap();
        path
    }

    #[test]
    fn test_plan_names_targets_without_touching_disk() {
        let temp = TempDir::new().unwrap();
        let jar = write_bundle(temp.path(), "runtime.jar", "org.demo.runtime", "1.0.0");
        let install = temp.path().join("install");

        let task = SetupTask::new(vec![jar.clone()], &install);
        let plan = task.plan().unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].source, jar);
        assert_eq!(
            plan[0].target,
            install.join("plugins").join("org.demo.runtime_1.0.0.jar")
        );
        assert!(!install.exists());
    }

    #[test]
    fn test_copy_files_renames_and_preserves_bytes() {
        let temp = TempDir::new().unwrap();
        let a = write_bundle(temp.path(), "a.jar", "org.demo.a", "1.0.0");
        let b = write_bundle(temp.path(), "b.jar", "org.demo.b", "2.1.0.v2024");
        let install = temp.path().join("install");

        let report = SetupTask::new(vec![a.clone(), b.clone()], &install)
            .copy_files()
            .unwrap();

        assert_eq!(report.plugins.len(), 2);
        let copied_a = install.join("plugins/org.demo.a_1.0.0.jar");
        let copied_b = install.join("plugins/org.demo.b_2.1.0.v2024.jar");
        assert_eq!(fs::read(&copied_a).unwrap(), fs::read(&a).unwrap());
        assert_eq!(fs::read(&copied_b).unwrap(), fs::read(&b).unwrap());
        assert_eq!(
            report.total_bytes(),
            fs::metadata(&a).unwrap().len() + fs::metadata(&b).unwrap().len()
        );
    }

    #[test]
    fn test_duplicate_bundles_are_rejected() {
        let temp = TempDir::new().unwrap();
        let a = write_bundle(temp.path(), "a.jar", "org.demo", "1.0.0");
        let b = write_bundle(temp.path(), "b.jar", "org.demo", "1.0.0");

        let err = SetupTask::new(vec![a, b], temp.path().join("install"))
            .plan()
            .unwrap_err();
        assert!(matches!(
            err,
            SetupError::DuplicateBundle { ref file_name, .. } if file_name == "org.demo_1.0.0.jar"
        ));
    }

    #[test]
    fn test_source_inside_install_dir_is_rejected() {
        let temp = TempDir::new().unwrap();
        let install = temp.path().join("install");
        fs::create_dir_all(&install).unwrap();
        let jar = write_bundle(&install, "a.jar", "org.demo", "1.0.0");

        let err = SetupTask::new(vec![jar.clone()], &install)
            .copy_files()
            .unwrap_err();
        assert!(matches!(err, SetupError::SourceInsideInstallDir { .. }));
        assert!(jar.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_files_into_symlinked_install_dir() {
        let temp = TempDir::new().unwrap();
        let jar = write_bundle(temp.path(), "a.jar", "org.demo", "1.0.0");
        let scratch = temp.path().join("scratch");
        fs::create_dir_all(&scratch).unwrap();
        fs::write(scratch.join("stale.txt"), b"old").unwrap();
        let install = temp.path().join("install");
        std::os::unix::fs::symlink(&scratch, &install).unwrap();

        let report = SetupTask::new(vec![jar.clone()], &install)
            .copy_files()
            .unwrap();

        assert_eq!(report.plugins.len(), 1);
        assert!(!scratch.join("stale.txt").exists());
        assert_eq!(
            fs::read(scratch.join("plugins/org.demo_1.0.0.jar")).unwrap(),
            fs::read(&jar).unwrap()
        );
    }

    #[test]
    fn test_report_written_as_json() {
        let temp = TempDir::new().unwrap();
        let jar = write_bundle(temp.path(), "a.jar", "org.demo", "1.0.0");
        let install = temp.path().join("install");

        let report = SetupTask::new(vec![jar], &install).copy_files().unwrap();
        let report_path = temp.path().join("reports/install.json");
        report.write_json(&report_path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(json["plugins"][0]["symbolic_name"], "org.demo");
        assert_eq!(json["plugins"][0]["version"], "1.0.0");
        assert!(json["completed_at"].is_string());
    }
}
