pub mod manifest;
pub mod setup;
pub mod source;

pub use crate::domain::model::{BundleId, InstallReport, InstalledPlugin, PlannedCopy};
pub use crate::domain::ports::{ConfigProvider, PluginSource};
pub use crate::utils::error::Result;
