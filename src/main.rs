use clap::Parser;
use equinox_setup::utils::{logger, validation::Validate};
use equinox_setup::{CliConfig, ConfigProvider, SetupError, SetupSettings, TomlConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting equinox-setup");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Setup failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<(), SetupError> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let loaded = TomlConfig::from_file(path)?;
            loaded.validate()?;
            Some(loaded)
        }
        None => None,
    };

    let settings = SetupSettings::resolve(
        config,
        file_config.as_ref().map(|c| c as &dyn ConfigProvider),
    )?;
    settings.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let (task, report_path) = settings.into_task();

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the install directory is left untouched");
        let plan = task.plan()?;
        println!(
            "Would install {} plugin(s) into {}:",
            plan.len(),
            task.plugins_dir().display()
        );
        for copy in &plan {
            println!("  {} -> {}", copy.source.display(), copy.bundle.file_name());
        }
        return Ok(());
    }

    let report = task.copy_files()?;

    println!(
        "✅ Installed {} plugin(s) ({} bytes) into {}",
        report.plugins.len(),
        report.total_bytes(),
        report.plugins_dir.display()
    );

    if let Some(path) = report_path {
        report.write_json(&path)?;
        tracing::info!("📝 Report written to: {}", path.display());
    }

    Ok(())
}
