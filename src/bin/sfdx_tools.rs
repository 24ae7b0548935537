use anyhow::Context;
use clap::{Parser, Subcommand};
use sfdx_sandbox::utils::progress::{with_loading_bar, LoadingBar};
use sfdx_sandbox::utils::validation::{self, Validate};
use sfdx_sandbox::utils::logger;
use sfdx_sandbox::{ProcessRunner, SandboxSettings, Sfdx};

#[derive(Parser)]
#[command(name = "sfdx-tools")]
#[command(about = "Run single sfdx commands and print their JSON result")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List authorized orgs
    ListOrgs,

    /// Execute an anonymous Apex file
    ExecuteApex {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        file: String,
    },

    /// Import records from a data file or a plan
    ImportData {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        path: Option<String>,

        #[arg(long)]
        plan: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let settings = SandboxSettings::load(args.config.as_deref())
        .with_context(|| format!("failed to load settings from {:?}", args.config))?;
    settings.validate().context("invalid settings")?;
    let sfdx = Sfdx::with_program(ProcessRunner::new(), settings.cli.program.clone());

    let bar = if settings.progress.enabled {
        LoadingBar::new(settings.progress.interval())
    } else {
        LoadingBar::hidden()
    };

    let result = match &args.command {
        Command::ListOrgs => with_loading_bar(bar, sfdx.list_orgs()).await,
        Command::ExecuteApex { username, file } => {
            validation::validate_org_identifier("username", username)?;
            validation::validate_path("file", file)?;
            with_loading_bar(bar, sfdx.execute_apex(username, file)).await
        }
        Command::ImportData {
            username,
            path,
            plan,
        } => {
            validation::validate_org_identifier("username", username)?;
            with_loading_bar(
                bar,
                sfdx.data_import(username, path.as_deref(), plan.as_deref()),
            )
            .await
        }
    };

    let value = result.context("sfdx command failed")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
