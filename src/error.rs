//! Unified crate error types.

use thiserror::Error;

/// Top-level overlay engine error.
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors from either upstream provider.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Upstream HTTP status carried by this error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::ServerError { status, .. } => Some(*status),
            HttpError::RateLimited { .. } => Some(429),
            HttpError::Unauthorized => Some(401),
            HttpError::NotFound(_) => Some(404),
            HttpError::BadRequest(_) => Some(400),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_status_mapping() {
        assert_eq!(
            HttpError::ServerError {
                status: 503,
                body: String::new()
            }
            .status(),
            Some(503)
        );
        assert_eq!(
            HttpError::RateLimited {
                retry_after_ms: None
            }
            .status(),
            Some(429)
        );
        assert_eq!(HttpError::Unauthorized.status(), Some(401));
        assert_eq!(HttpError::Timeout.status(), None);
    }

    #[test]
    fn test_overlay_error_wraps_http() {
        let err: OverlayError = HttpError::Timeout.into();
        assert!(matches!(err, OverlayError::Http(HttpError::Timeout)));
    }
}
