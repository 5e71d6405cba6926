//! Internal configuration and wire types for the builds API.

use artifact_core::{BuildId, BuildSummary};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::error::{RestError, RestResult};

/// Resolved client configuration used by the backend and URL builders.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub collection_url: Url,
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout_ms: u64,
    pub max_retries: u8,
    pub retry_base_delay_ms: u64,
    pub api_version: String,
}

#[cfg(test)]
impl Default for RestConfig {
    fn default() -> Self {
        Self {
            collection_url: Url::parse("https://dev.azure.com/fabrikam/").unwrap(),
            token: None,
            user_agent: "artifact-rest-test".to_string(),
            timeout_ms: 30_000,
            max_retries: 3,
            retry_base_delay_ms: 500,
            api_version: "7.1".to_string(),
        }
    }
}

/// Envelope returned by list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// A single build as returned by the builds endpoint.
///
/// Only the fields the resolver needs are kept; the rest of the payload is
/// ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDto {
    pub id: u32,
    #[serde(default)]
    pub finish_time: Option<DateTime<Utc>>,
}

impl BuildDto {
    /// Convert into the core summary, rejecting the reserved id `0`.
    pub fn into_summary(self) -> RestResult<BuildSummary> {
        let id = BuildId::new(self.id).ok_or_else(|| RestError::InvalidResponse {
            message: "build id 0 in builds listing".to_string(),
        })?;
        Ok(BuildSummary {
            id,
            finish_time: self.finish_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_build_listing() {
        let payload = json!({
            "count": 2,
            "value": [
                {"id": 7, "finishTime": "2024-03-01T10:00:00.123Z", "buildNumber": "20240301.1"},
                {"id": 5, "status": "completed"}
            ]
        });

        let listing: ListResponse<BuildDto> = serde_json::from_value(payload).unwrap();
        assert_eq!(listing.count, Some(2));
        assert_eq!(listing.value.len(), 2);
        assert_eq!(listing.value[0].id, 7);
        assert!(listing.value[0].finish_time.is_some());
        assert!(listing.value[1].finish_time.is_none());
    }

    #[test]
    fn test_missing_value_is_empty() {
        let listing: ListResponse<BuildDto> = serde_json::from_value(json!({"count": 0})).unwrap();
        assert!(listing.value.is_empty());
    }

    #[test]
    fn test_into_summary_rejects_zero_id() {
        let dto = BuildDto {
            id: 0,
            finish_time: None,
        };
        assert!(matches!(
            dto.into_summary(),
            Err(RestError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_into_summary_keeps_finish_time() {
        let dto: BuildDto =
            serde_json::from_value(json!({"id": 12, "finishTime": "2024-03-01T10:00:00Z"}))
                .unwrap();
        let summary = dto.into_summary().unwrap();
        assert_eq!(summary.id.get(), 12);
        assert_eq!(
            summary.finish_time.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
    }
}
