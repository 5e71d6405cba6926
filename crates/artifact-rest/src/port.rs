//! `BuildQueryPort` implementation for `BuildsClient`.

use artifact_core::{BuildQuery, BuildQueryError, BuildQueryPort, BuildSummary};
use async_trait::async_trait;

use crate::client::BuildsClient;
use crate::error::RestError;
use crate::http::HttpBackend;

/// Convert internal `RestError` to the port error for `project`.
fn map_error(err: RestError, project: &str) -> BuildQueryError {
    match err {
        RestError::ApiRequestFailed { status, url } => match status {
            404 => BuildQueryError::ProjectNotFound {
                project: project.to_string(),
            },
            401 | 403 => BuildQueryError::Unauthorized {
                project: project.to_string(),
            },
            _ => BuildQueryError::Network {
                message: format!("API request failed with status {status}: {url}"),
            },
        },
        RestError::InvalidResponse { message } => BuildQueryError::InvalidResponse { message },
        RestError::Network(e) => BuildQueryError::Network {
            message: e.to_string(),
        },
        RestError::JsonParse(e) => BuildQueryError::InvalidResponse {
            message: e.to_string(),
        },
        e @ (RestError::InvalidUrl(_) | RestError::InvalidBaseUrl { .. }) => {
            BuildQueryError::Configuration {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> BuildQueryPort for BuildsClient<B> {
    async fn list_builds(&self, query: &BuildQuery) -> Result<Vec<BuildSummary>, BuildQueryError> {
        self.list_completed_builds(query)
            .await
            .map_err(|e| map_error(e, &query.project.to_string()))
    }
}
