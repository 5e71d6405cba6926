//! Build listing.

use artifact_core::{BuildQuery, BuildSummary};
use tracing::debug;

use super::BuildsClient;
use crate::error::RestResult;
use crate::http::HttpBackend;
use crate::models::{BuildDto, ListResponse};
use crate::url::build_list_url;

impl<B: HttpBackend> BuildsClient<B> {
    /// List completed builds matching `query`, in the order the service returns them.
    pub(crate) async fn list_completed_builds(
        &self,
        query: &BuildQuery,
    ) -> RestResult<Vec<BuildSummary>> {
        let url = build_list_url(&self.config, query)?;
        debug!(%url, "Listing builds");

        let listing: ListResponse<BuildDto> = self.backend.get_json(&url).await?;
        let reported = listing.count;
        let builds = listing
            .value
            .into_iter()
            .map(BuildDto::into_summary)
            .collect::<RestResult<Vec<_>>>()?;

        debug!(count = builds.len(), ?reported, "Builds listed");
        Ok(builds)
    }
}
