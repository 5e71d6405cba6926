//! The download-pipeline-artifact task.
//!
//! Runs validation, resolution and orchestration in order for one
//! invocation. The first failure aborts the invocation and is returned
//! as-is; marking the step failed is the caller's job.

use std::path::PathBuf;
use std::sync::Arc;

use artifact_core::{
    ArtifactDownloadPort, ArtifactResult, BuildQueryPort, DownloadSummary, ResolvedBuild,
    TaskContext,
};
use tracing::{info, instrument};

use crate::orchestrator::DownloadOrchestrator;
use crate::resolver::BuildResolver;
use crate::validator::validate;

/// Task version reported to the agent. Publish and download tasks share it.
pub const TASK_VERSION: &str = "1.0.0";

/// Execution stage the task runs in.
pub const TASK_STAGE: &str = "main";

/// Dependencies for the task.
pub struct TaskDeps {
    /// Build listing collaborator, used by the latest strategies.
    pub build_query: Arc<dyn BuildQueryPort>,
    /// Artifact transfer collaborator.
    pub artifacts: Arc<dyn ArtifactDownloadPort>,
}

/// Result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    /// The build the artifact came from.
    pub build: ResolvedBuild,
    /// Absolute directory the files were written to.
    pub destination: PathBuf,
    /// Totals reported by the artifact port.
    pub summary: DownloadSummary,
}

/// Downloads one pipeline artifact per invocation.
pub struct DownloadPipelineArtifactTask {
    resolver: BuildResolver,
    orchestrator: DownloadOrchestrator,
}

impl DownloadPipelineArtifactTask {
    /// Build the task from its collaborators.
    pub fn new(deps: TaskDeps) -> Self {
        Self {
            resolver: BuildResolver::new(deps.build_query),
            orchestrator: DownloadOrchestrator::new(deps.artifacts),
        }
    }

    /// Run one invocation against the given context.
    #[instrument(skip_all, name = "download_pipeline_artifact")]
    pub async fn run(&self, ctx: &dyn TaskContext) -> ArtifactResult<TaskOutcome> {
        let request = validate(ctx)?;
        let build = self
            .resolver
            .resolve(&request, &ctx.cancellation_token())
            .await?;
        let completed = self.orchestrator.run(&build, &request, ctx).await?;

        info!(
            %build,
            destination = %completed.destination.display(),
            files = completed.summary.files_downloaded,
            "Pipeline artifact downloaded"
        );

        Ok(TaskOutcome {
            build,
            destination: completed.destination,
            summary: completed.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockArtifacts, MockBuilds, build};
    use artifact_core::names::{inputs, variables};
    use artifact_core::{ArtifactError, MemoryTaskContext, ProjectRef};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_current_build_end_to_end() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let mut builds = MockBuilds::new();
        builds.expect_list_builds().never();

        let mut artifacts = MockArtifacts::new();
        artifacts
            .expect_download()
            .withf(|download, _| {
                download.build_id.get() == 42
                    && download.artifact_name == "drop"
                    && download.file_patterns.is_empty()
                    && download.project
                        == ProjectRef::parse("00000000-0000-0000-0000-000000000001")
            })
            .times(1)
            .returning(|_, _| Ok(DownloadSummary::default()));

        let ctx = MemoryTaskContext::new()
            .with_input(inputs::BUILD_TYPE, "current")
            .with_input(inputs::ARTIFACT_NAME, "drop")
            .with_input(inputs::DOWNLOAD_PATH, out.display().to_string())
            .with_variable(variables::BUILD_ID, "42")
            .with_variable(
                variables::TEAM_PROJECT_ID,
                "00000000-0000-0000-0000-000000000001",
            );

        let task = DownloadPipelineArtifactTask::new(TaskDeps {
            build_query: Arc::new(builds),
            artifacts: Arc::new(artifacts),
        });
        let outcome = task.run(&ctx).await.unwrap();

        assert_eq!(outcome.build.build_id, build(42));
        assert_eq!(outcome.destination, out);
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_empty_latest_query_never_downloads() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let mut builds = MockBuilds::new();
        builds
            .expect_list_builds()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut artifacts = MockArtifacts::new();
        artifacts.expect_download().never();

        let ctx = MemoryTaskContext::new()
            .with_input(inputs::BUILD_TYPE, "specific")
            .with_input(inputs::PROJECT, "Fabrikam")
            .with_input(inputs::BUILD_VERSION_TO_DOWNLOAD, "latest")
            .with_input(inputs::DEFINITION, "9")
            .with_input(inputs::TAGS, "")
            .with_input(inputs::ARTIFACT_NAME, "drop")
            .with_input(inputs::DOWNLOAD_PATH, out.display().to_string());

        let task = DownloadPipelineArtifactTask::new(TaskDeps {
            build_query: Arc::new(builds),
            artifacts: Arc::new(artifacts),
        });
        let err = task.run(&ctx).await.unwrap_err();

        assert!(matches!(err, ArtifactError::NoMatchingBuild { definition_id: 9, .. }));
        assert!(!out.exists());
        assert!(ctx.lines().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_touches_nothing() {
        let mut builds = MockBuilds::new();
        builds.expect_list_builds().never();
        let mut artifacts = MockArtifacts::new();
        artifacts.expect_download().never();

        let ctx = MemoryTaskContext::new()
            .with_input(inputs::BUILD_TYPE, "current")
            .with_input(inputs::ARTIFACT_NAME, "drop")
            .with_input(inputs::DOWNLOAD_PATH, "/out")
            .with_variable(variables::HOST_TYPE, "release");

        let task = DownloadPipelineArtifactTask::new(TaskDeps {
            build_query: Arc::new(builds),
            artifacts: Arc::new(artifacts),
        });
        let err = task.run(&ctx).await.unwrap_err();

        assert!(matches!(err, ArtifactError::BuildIdUnavailableForHost { .. }));
    }
}
