//! Internal error types for REST operations.
//!
//! These errors are internal to `artifact-rest` and are mapped to the build
//! query port error at the boundary.

use thiserror::Error;

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

/// Errors related to pipelines REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// API request failed with an HTTP error status.
    #[error("Pipelines API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from pipelines API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The collection URL cannot carry path segments.
    #[error("Collection URL cannot be used as a base: {url}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_error_message() {
        let error = RestError::ApiRequestFailed {
            status: 404,
            url: "https://dev.azure.com/fabrikam/p/_apis/build/builds".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("dev.azure.com"));
    }

    #[test]
    fn test_invalid_response_error_message() {
        let error = RestError::InvalidResponse {
            message: "build id 0".to_string(),
        };
        assert!(error.to_string().contains("build id 0"));
    }

    #[test]
    fn test_invalid_url_from_parse_error() {
        let error: RestError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(error, RestError::InvalidUrl(_)));
    }
}
