pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{toml_config::TomlConfig, SetupSettings};
pub use crate::core::{
    manifest::{read_bundle, read_manifest, Manifest},
    setup::SetupTask,
    source::LaunchSource,
};
pub use crate::domain::model::{BundleId, InstallReport, InstalledPlugin, PlannedCopy};
pub use crate::domain::ports::{ConfigProvider, PluginSource};
pub use crate::utils::error::{Result, SetupError};
