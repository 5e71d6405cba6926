//! URL construction for the builds API.

use artifact_core::{BuildQuery, BuildQueryOrder};
use url::Url;

use crate::error::{RestError, RestResult};
use crate::models::RestConfig;

/// Normalize a branch filter to a full ref name.
///
/// `main` becomes `refs/heads/main`; anything already under `refs/` is kept.
pub fn normalize_branch(branch: &str) -> String {
    let branch = branch.trim();
    if branch.starts_with("refs/") {
        branch.to_string()
    } else {
        format!("refs/heads/{branch}")
    }
}

const fn order_param(order: BuildQueryOrder) -> &'static str {
    match order {
        BuildQueryOrder::FinishTimeDescending => "finishTimeDescending",
    }
}

/// Build the URL for listing completed builds matching `query`.
///
/// Format: `{collection}/{project}/_apis/build/builds?definitions=..&statusFilter=completed&..`
pub fn build_list_url(config: &RestConfig, query: &BuildQuery) -> RestResult<Url> {
    let mut url = config.collection_url.clone();
    let project = query.project.to_string();

    url.path_segments_mut()
        .map_err(|()| RestError::InvalidBaseUrl {
            url: config.collection_url.to_string(),
        })?
        .pop_if_empty()
        .push(&project)
        .extend(["_apis", "build", "builds"]);

    {
        let mut pairs = url.query_pairs_mut();
        if !query.definition_ids.is_empty() {
            let definitions = query
                .definition_ids
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            pairs.append_pair("definitions", &definitions);
        }
        if let Some(branch) = query.branch_name.as_deref() {
            pairs.append_pair("branchName", &normalize_branch(branch));
        }
        let tags: Vec<&str> = query.effective_tags().collect();
        if !tags.is_empty() {
            pairs.append_pair("tagFilters", &tags.join(","));
        }
        pairs
            .append_pair("statusFilter", "completed")
            .append_pair("queryOrder", order_param(query.order))
            .append_pair("api-version", &config.api_version);
    }

    Ok(url)
}
