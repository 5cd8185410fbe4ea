use clap::Parser;
use pyexplorer_bootstrap::core::host::HostInfo;
use pyexplorer_bootstrap::utils::{logger, validation::Validate};
use pyexplorer_bootstrap::{BootstrapEngine, BootstrapError, CliConfig, SystemRunner};

fn fail(e: &BootstrapError) -> ! {
    tracing::error!(
        "Bootstrap failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    if let Err(e) = config.validate() {
        fail(&e);
    }

    HostInfo::detect().log_summary(config.system_enabled);

    let engine = BootstrapEngine::new(SystemRunner::new(), config);

    let (report, outcome) = engine.run_with_report().await;

    // Also written for failed runs.
    if let Some(path) = &cli.json_report {
        match report.write_json(path) {
            Ok(()) => tracing::info!("Report written to {}", path.display()),
            Err(e) => tracing::error!("Could not write report to {}: {}", path.display(), e),
        }
    }

    if let Err(e) = outcome {
        fail(&e);
    }

    std::process::exit(report.exit_code());
}
