use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Supplies the plugin archives to install, already resolved to local files.
pub trait PluginSource {
    fn resolved_files(&self) -> Result<Vec<PathBuf>>;
}

pub trait ConfigProvider {
    fn install_dir(&self) -> Option<&Path>;
    fn plugins(&self) -> &[PathBuf];
    fn plugin_dirs(&self) -> &[PathBuf];
    fn report_path(&self) -> Option<&Path>;
}

impl PluginSource for Vec<PathBuf> {
    fn resolved_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}
