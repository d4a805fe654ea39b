#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::setup::SetupTask;
use crate::core::source::LaunchSource;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SetupError};
use crate::utils::validation::{
    validate_file_extensions, validate_not_root, validate_path, validate_required_field, Validate,
};
use std::path::PathBuf;

/// Effective settings after merging the command line over the configuration file.
#[derive(Debug, Clone)]
pub struct SetupSettings {
    pub install_dir: PathBuf,
    pub source: LaunchSource,
    pub report: Option<PathBuf>,
}

impl SetupSettings {
    /// Scalars from `primary` win; plugin lists are concatenated, `fallback` first.
    pub fn resolve(
        primary: &dyn ConfigProvider,
        fallback: Option<&dyn ConfigProvider>,
    ) -> Result<Self> {
        let install_dir = primary
            .install_dir()
            .or_else(|| fallback.and_then(|f| f.install_dir()))
            .map(PathBuf::from);
        let install_dir = validate_required_field("install_dir", &install_dir)?.clone();

        let report = primary
            .report_path()
            .or_else(|| fallback.and_then(|f| f.report_path()))
            .map(PathBuf::from);

        let mut plugins = Vec::new();
        let mut plugin_dirs = Vec::new();
        for provider in fallback.into_iter().chain(std::iter::once(primary)) {
            plugins.extend_from_slice(provider.plugins());
            plugin_dirs.extend_from_slice(provider.plugin_dirs());
        }

        Ok(Self {
            install_dir,
            source: LaunchSource::new(plugins, plugin_dirs),
            report,
        })
    }

    pub fn into_task(self) -> (SetupTask<LaunchSource>, Option<PathBuf>) {
        (SetupTask::new(self.source, self.install_dir), self.report)
    }
}

impl Validate for SetupSettings {
    fn validate(&self) -> Result<()> {
        validate_path("install_dir", &self.install_dir)?;
        validate_not_root("install_dir", &self.install_dir)?;

        if self.source.is_empty() {
            return Err(SetupError::ConfigError {
                message: "no plugins or plugin directories were given".to_string(),
            });
        }

        for dir in self.source.plugin_dirs() {
            validate_path("plugin_dirs", dir)?;
        }
        validate_file_extensions("plugins", self.source.plugins(), &["jar"])?;

        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        Ok(())
    }
}
