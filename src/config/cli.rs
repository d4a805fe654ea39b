use crate::core::ConfigProvider;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "equinox-setup")]
#[command(about = "Copies OSGi plugins into an Equinox install directory as <name>_<version>.jar")]
pub struct CliConfig {
    /// TOML configuration file; command-line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to (re)create; plugins land in its `plugins/` subdirectory
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// Plugin jar to install (repeatable, or comma separated)
    #[arg(long = "plugin", value_delimiter = ',')]
    pub plugins: Vec<PathBuf>,

    /// Directory whose top-level *.jar files are installed (repeatable)
    #[arg(long = "plugin-dir")]
    pub plugin_dirs: Vec<PathBuf>,

    /// Write a JSON report of the installed plugins to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Show what would be installed without touching the install directory
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn install_dir(&self) -> Option<&Path> {
        self.install_dir.as_deref()
    }

    fn plugins(&self) -> &[PathBuf] {
        &self.plugins
    }

    fn plugin_dirs(&self) -> &[PathBuf] {
        &self.plugin_dirs
    }

    fn report_path(&self) -> Option<&Path> {
        self.report.as_deref()
    }
}
