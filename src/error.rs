//! Dashboard error types
//!
//! Every dashboard operation logs its failure and also hands it back to the
//! caller as a [`DashboardError`].

use thiserror::Error;

/// Errors that can occur while talking to the Invoice API
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Connection refused or host unreachable
    #[error("Invoice API unavailable")]
    Unavailable,

    /// The request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The HTTP client could not be built
    #[error("Client error: {0}")]
    Client(String),
}

impl DashboardError {
    /// Classify a reqwest transport error
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DashboardError::Timeout
        } else if err.is_connect() {
            DashboardError::Unavailable
        } else if err.is_decode() {
            DashboardError::Decode(err.to_string())
        } else {
            DashboardError::Request(err)
        }
    }

    /// Whether the API itself rejected the request (as opposed to a transport failure)
    pub fn is_api_error(&self) -> bool {
        matches!(self, DashboardError::Api { .. })
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Decode(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: not found");
        assert!(err.is_api_error());

        assert_eq!(DashboardError::Timeout.to_string(), "Request timeout");
        assert!(!DashboardError::Unavailable.is_api_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Decode(_)));
    }
}
