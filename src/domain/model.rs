use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OSGi identity of a plugin archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleId {
    pub symbolic_name: String,
    pub version: String,
    #[serde(default)]
    pub is_source: bool,
}

impl BundleId {
    /// `<symbolicName>_<version>.jar`, the layout an Equinox `plugins/` folder expects.
    pub fn file_name(&self) -> String {
        format!("{}_{}.jar", self.symbolic_name, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCopy {
    pub source: PathBuf,
    pub target: PathBuf,
    pub bundle: BundleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPlugin {
    pub source: PathBuf,
    pub target: PathBuf,
    pub symbolic_name: String,
    pub version: String,
    pub is_source: bool,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallReport {
    pub install_dir: PathBuf,
    pub plugins_dir: PathBuf,
    pub plugins: Vec<InstalledPlugin>,
    pub completed_at: DateTime<Utc>,
}
