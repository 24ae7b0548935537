use clap::Parser;
use sfdx_sandbox::utils::{logger, validation::Validate};
use sfdx_sandbox::{CliConfig, ProcessRunner, SandboxSettings, SandboxWorkflow, Sfdx};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Invalid arguments: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let mut settings = match SandboxSettings::load(config.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load settings: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };
    if config.no_progress {
        settings.progress.enabled = false;
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Settings validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let sfdx = Sfdx::with_program(ProcessRunner::new(), settings.cli.program.clone());
    let workflow = SandboxWorkflow::new(sfdx, settings);

    match workflow.run(&config.request()).await {
        Ok(report) => {
            tracing::info!(
                "✅ Sandbox '{}' created and deployed in {}s",
                config.alias,
                report.elapsed().num_seconds()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            println!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
