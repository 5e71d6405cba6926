//! CLI entry point - the composition root.

use artifact_cli::Cli;
use artifact_cli::handler::{execute, exit_code};
use artifact_download::{TASK_STAGE, TASK_VERSION};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // stdout carries the step log; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!(version = TASK_VERSION, stage = TASK_STAGE, "Starting artifact download");

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            signal_token.cancel();
        }
    });

    match execute(&cli, token).await {
        Ok(outcome) => {
            info!(build = %outcome.build, destination = %outcome.destination.display(), "Done");
            Ok(())
        }
        Err(err) => {
            eprintln!("##[error]{err:#}");
            std::process::exit(exit_code(&err));
        }
    }
}
