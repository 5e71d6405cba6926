//! Builds client for the pipelines REST API.

mod builds;

use url::Url;

use crate::config::BuildsClientConfig;
use crate::error::{RestError, RestResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::RestConfig;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default builds client using the reqwest HTTP backend.
pub type DefaultBuildsClient = BuildsClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the builds endpoint of a collection.
///
/// Generic over the HTTP backend so tests can inject canned responses.
/// External code constructs `DefaultBuildsClient::new()` and uses it through
/// `BuildQueryPort`.
pub struct BuildsClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: RestConfig,
}

impl DefaultBuildsClient {
    /// Create a client for the configured collection.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the collection URL does not parse or
    /// the HTTP client cannot be initialised.
    pub fn new(config: &BuildsClientConfig) -> Result<Self, artifact_core::BuildQueryError> {
        let build = || -> RestResult<Self> {
            let internal_config = to_internal_config(config)?;
            let backend = ReqwestBackend::new(&internal_config)?;
            Ok(Self {
                backend,
                config: internal_config,
            })
        };
        build().map_err(|e| artifact_core::BuildQueryError::Configuration {
            message: e.to_string(),
        })
    }
}

impl<B: HttpBackend> BuildsClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: RestConfig, backend: B) -> Self {
        Self { backend, config }
    }
}

fn to_internal_config(config: &BuildsClientConfig) -> RestResult<RestConfig> {
    let raw = config.collection_url.trim();
    if raw.is_empty() {
        return Err(RestError::InvalidBaseUrl {
            url: String::new(),
        });
    }
    Ok(RestConfig {
        collection_url: Url::parse(raw)?,
        token: config.token.clone().filter(|t| !t.is_empty()),
        user_agent: config.user_agent.clone(),
        timeout_ms: u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX),
        max_retries: config.max_retries,
        retry_base_delay_ms: u64::try_from(config.retry_base_delay.as_millis())
            .unwrap_or(u64::MAX),
        api_version: config.api_version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_core::BuildQueryError;
    use std::time::Duration;

    #[test]
    fn test_default_client_creation() {
        let config = BuildsClientConfig::new("https://dev.azure.com/fabrikam/");
        assert!(DefaultBuildsClient::new(&config).is_ok());
    }

    #[test]
    fn test_invalid_collection_url_is_configuration_error() {
        let config = BuildsClientConfig::new("not a url");
        assert!(matches!(
            DefaultBuildsClient::new(&config),
            Err(BuildQueryError::Configuration { .. })
        ));
    }

    #[test]
    fn test_empty_collection_url_is_configuration_error() {
        let config = BuildsClientConfig::new("   ");
        assert!(matches!(
            DefaultBuildsClient::new(&config),
            Err(BuildQueryError::Configuration { .. })
        ));
    }

    #[test]
    fn test_to_internal_config() {
        let config = BuildsClientConfig::new("https://dev.azure.com/fabrikam/")
            .with_optional_token(Some(String::new()))
            .with_retry_delay(Duration::from_millis(250))
            .with_timeout(Duration::from_secs(5));
        let internal = to_internal_config(&config).unwrap();

        assert_eq!(internal.collection_url.as_str(), "https://dev.azure.com/fabrikam/");
        assert!(internal.token.is_none());
        assert_eq!(internal.retry_base_delay_ms, 250);
        assert_eq!(internal.timeout_ms, 5_000);
    }
}
