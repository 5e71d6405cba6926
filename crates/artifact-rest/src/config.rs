//! Client settings for the builds endpoint.

use std::fmt;
use std::time::Duration;

/// Settings for `DefaultBuildsClient`.
///
/// Only the collection URL is required. The token is sent as a bearer
/// header exactly as given and is never printed by `Debug`.
///
/// ```
/// use artifact_rest::BuildsClientConfig;
/// use std::time::Duration;
///
/// let config = BuildsClientConfig::new("https://dev.azure.com/fabrikam/")
///     .with_optional_token(std::env::var("SYSTEM_ACCESSTOKEN").ok())
///     .with_max_retries(5)
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct BuildsClientConfig {
    pub(crate) collection_url: String,
    pub(crate) token: Option<String>,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u8,
    pub(crate) retry_base_delay: Duration,
    pub(crate) api_version: String,
}

impl BuildsClientConfig {
    /// Default REST API version.
    pub const DEFAULT_API_VERSION: &'static str = "7.1";

    /// Settings for `collection_url`: no token, 30s timeout, 3 retries
    /// starting at 500ms, API version [`Self::DEFAULT_API_VERSION`].
    #[must_use]
    pub fn new(collection_url: impl Into<String>) -> Self {
        Self {
            collection_url: collection_url.into(),
            token: None,
            user_agent: concat!("artifact-rest/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Bearer token, if the agent provided one.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries after a 5xx response or network error. `0` disables retrying.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Delay before the first retry; each further retry doubles it.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// `api-version` query parameter.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

impl fmt::Debug for BuildsClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildsClientConfig")
            .field("collection_url", &self.collection_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay", &self.retry_base_delay)
            .field("api_version", &self.api_version)
            .finish()
    }
}
