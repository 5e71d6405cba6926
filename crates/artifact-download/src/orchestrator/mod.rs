//! Download orchestration.
//!
//! Prepares the destination and drives one call to the artifact port for a
//! resolved build. Each step finishes before the next starts:
//!
//! 1. resolve the destination to an absolute path
//! 2. create the destination directory
//! 3. report that the download is starting
//! 4. call the artifact port with the cancellation token
//! 5. report that the download finished
//!
//! Failures from the artifact port are returned unchanged; retries belong
//! to the port implementation.

mod destination;

pub use destination::DownloadDestination;

use std::path::PathBuf;
use std::sync::Arc;

use artifact_core::{
    ArtifactDownload, ArtifactDownloadPort, ArtifactError, ArtifactResult, DownloadRequest,
    DownloadSummary, ResolvedBuild, TaskContext,
};
use tracing::info;

/// Outcome of a finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedDownload {
    /// Absolute destination directory.
    pub destination: PathBuf,
    /// Totals reported by the artifact port.
    pub summary: DownloadSummary,
}

/// Drives the artifact port for one resolved build.
pub struct DownloadOrchestrator {
    artifacts: Arc<dyn ArtifactDownloadPort>,
}

impl DownloadOrchestrator {
    /// Create a new orchestrator with the given artifact port.
    pub fn new(artifacts: Arc<dyn ArtifactDownloadPort>) -> Self {
        Self { artifacts }
    }

    /// Download the request's artifact from `build` into the request's destination.
    pub async fn run(
        &self,
        build: &ResolvedBuild,
        request: &DownloadRequest,
        ctx: &dyn TaskContext,
    ) -> ArtifactResult<CompletedDownload> {
        let cancel = ctx.cancellation_token();
        let destination = DownloadDestination::plan(&request.destination_path)?;

        if cancel.is_cancelled() {
            return Err(ArtifactError::Cancelled);
        }
        destination.ensure_dir().await?;

        report(
            ctx,
            &format!(
                "Downloading artifact '{}' from {build} to {}",
                request.artifact_name,
                destination.path().display()
            ),
        );

        if cancel.is_cancelled() {
            return Err(ArtifactError::Cancelled);
        }
        let download = ArtifactDownload::new(
            build,
            &request.artifact_name,
            destination.path(),
            request.file_patterns.clone(),
        );
        let summary = self.artifacts.download(&download, &cancel).await?;

        report(
            ctx,
            &format!(
                "Downloaded {} file(s), {} byte(s) to {}",
                summary.files_downloaded,
                summary.bytes_downloaded,
                destination.path().display()
            ),
        );

        Ok(CompletedDownload {
            destination: destination.into_path(),
            summary,
        })
    }
}

fn report(ctx: &dyn TaskContext, message: &str) {
    info!("{message}");
    ctx.output(message);
}
