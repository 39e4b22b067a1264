//! Error types for the registry client.

use thiserror::Error;

/// Result alias for registry client operations.
pub type RegistryClientResult<T> = Result<T, RegistryClientError>;

/// Errors from outbound registry calls.
///
/// `Transport` and `Status` together make up the upstream-unavailable
/// class: the registry could not be reached, or answered with a
/// non-success status. Neither is retried inline.
#[derive(Debug, Error)]
pub enum RegistryClientError {
    /// Invalid client configuration (bad base URL, client build failure).
    #[error("Invalid registry client configuration: {0}")]
    InvalidConfig(String),

    /// Network-level failure talking to the registry.
    #[error("Registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The registry answered with a non-success status.
    #[error("Registry returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The registry answered 2xx but the body was not what we expected.
    #[error("Unexpected registry response: {0}")]
    InvalidResponse(String),
}

impl RegistryClientError {
    /// Whether this error means the upstream registry is unavailable
    /// (network failure or non-success status).
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = RegistryClientError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://registry/Patient".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Registry returned 500 Internal Server Error for http://registry/Patient"
        );
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_invalid_response_is_not_unavailable() {
        let err = RegistryClientError::InvalidResponse("bundle entry is not an array".to_string());
        assert!(!err.is_unavailable());
    }
}
