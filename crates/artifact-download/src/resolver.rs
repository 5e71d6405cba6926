//! Build resolution.
//!
//! Maps a validated request to exactly one build. The current and explicit
//! strategies are answered from the request itself; the latest strategies
//! query the `BuildQueryPort`.

use std::sync::Arc;

use artifact_core::{
    ArtifactError, ArtifactResult, BuildQuery, BuildQueryPort, BuildSource, BuildSummary,
    DownloadRequest, ResolvedBuild,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Resolver that uses the build query port.
pub struct BuildResolver {
    build_query: Arc<dyn BuildQueryPort>,
}

impl BuildResolver {
    /// Create a new resolver with the given build query port.
    pub fn new(build_query: Arc<dyn BuildQueryPort>) -> Self {
        Self { build_query }
    }

    /// Resolve the build a request downloads from.
    ///
    /// An empty listing for a latest strategy is `NoMatchingBuild`, never a
    /// placeholder id.
    pub async fn resolve(
        &self,
        request: &DownloadRequest,
        cancel: &CancellationToken,
    ) -> ArtifactResult<ResolvedBuild> {
        let resolved = match &request.source {
            BuildSource::Current {
                build_id,
                project_id,
            } => ResolvedBuild::new(*project_id, *build_id),
            BuildSource::Explicit { project, build_id } => {
                ResolvedBuild::new(project.clone(), *build_id)
            }
            BuildSource::Latest {
                project,
                definition_id,
                tag_filters,
            } => {
                let query = BuildQuery::for_definition(project.clone(), *definition_id)
                    .with_tags(tag_filters.clone());
                self.resolve_latest(query, cancel).await?
            }
            BuildSource::LatestFromBranch {
                project,
                definition_id,
                branch_name,
                tag_filters,
            } => {
                let query = BuildQuery::for_definition(project.clone(), *definition_id)
                    .with_branch(branch_name.clone())
                    .with_tags(tag_filters.clone());
                self.resolve_latest(query, cancel).await?
            }
        };

        info!(
            project = %resolved.project,
            build_id = %resolved.build_id,
            strategy = ?request.version_strategy(),
            "Resolved source build"
        );
        Ok(resolved)
    }

    async fn resolve_latest(
        &self,
        query: BuildQuery,
        cancel: &CancellationToken,
    ) -> ArtifactResult<ResolvedBuild> {
        debug!(?query, "Querying builds");

        let builds = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ArtifactError::Cancelled),
            result = self.build_query.list_builds(&query) => result?,
        };

        debug!(count = builds.len(), "Build query returned");

        match select_latest(&builds) {
            Some(latest) => Ok(ResolvedBuild::new(query.project, latest.id)),
            None => Err(ArtifactError::NoMatchingBuild {
                project: query.project.to_string(),
                definition_id: query.definition_ids.first().copied().unwrap_or_default(),
                branch_name: query.branch_name,
                tag_filters: query.tag_filters,
            }),
        }
    }
}

/// Pick the build with the latest finish time.
///
/// Among builds with equal finish times the earliest in the listing wins.
/// Builds without a finish time rank below every finished build.
pub fn select_latest(builds: &[BuildSummary]) -> Option<&BuildSummary> {
    builds.iter().fold(None, |best, candidate| match best {
        Some(best) if candidate.finish_time <= best.finish_time => Some(best),
        _ => Some(candidate),
    })
}
