use crate::core::ConfigProvider;
use crate::utils::error::{Result, SetupError};
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub setup: SetupSection,
    #[serde(default)]
    pub source: SourceSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupSection {
    pub install_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    #[serde(default)]
    pub plugins: Vec<PathBuf>,
    #[serde(default)]
    pub plugin_dirs: Vec<PathBuf>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SetupError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SetupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        let result = ENV_VAR.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn install_dir(&self) -> Option<&Path> {
        self.setup.install_dir.as_deref()
    }

    fn plugins(&self) -> &[PathBuf] {
        &self.source.plugins
    }

    fn plugin_dirs(&self) -> &[PathBuf] {
        &self.source.plugin_dirs
    }

    fn report_path(&self) -> Option<&Path> {
        self.setup.report.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(install_dir) = &self.setup.install_dir {
            validate_path("setup.install_dir", install_dir)?;
        }
        if let Some(report) = &self.setup.report {
            validate_path("setup.report", report)?;
        }
        for dir in &self.source.plugin_dirs {
            validate_path("source.plugin_dirs", dir)?;
        }
        validate_file_extensions("source.plugins", &self.source.plugins, &["jar"])
    }
}
