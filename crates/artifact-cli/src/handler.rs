//! Runs the download task for parsed flags.

use anyhow::Context;
use artifact_download::{DownloadPipelineArtifactTask, TaskOutcome};
use tokio_util::sync::CancellationToken;

use crate::bootstrap::{CliConfig, bootstrap};
use crate::context::EnvTaskContext;
use crate::error::CliError;
use crate::parser::Cli;

/// Build the adapters and context from `cli`, then run the task once.
///
/// Task failures are returned as [`CliError`] inside the `anyhow::Error`
/// so the caller can pick an exit code with [`exit_code`].
pub async fn execute(cli: &Cli, token: CancellationToken) -> anyhow::Result<TaskOutcome> {
    let deps = bootstrap(&CliConfig::from_cli(cli)).context("failed to set up adapters")?;
    let ctx = EnvTaskContext::new(cli.inputs.clone(), cli.variables.clone(), token);

    let task = DownloadPipelineArtifactTask::new(deps);
    let outcome = task.run(&ctx).await.map_err(CliError::from)?;
    Ok(outcome)
}

/// Exit code for an error returned by [`execute`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
