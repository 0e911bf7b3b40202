//! API-specific error types
//!
//! Classifies HTTP outcomes before they are folded into `RosterError`.

use std::time::Duration;

use rota_domain::RosterError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx), including rejected payloads
    Client,
    /// No response reached the client
    Network,
    /// Local misconfiguration or an unusable response body
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 400; the raw body is kept so callers can parse field errors.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Unreadable response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::BadRequest(_) | Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) | Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// True when the service answered at all (any status).
    pub fn has_response(&self) -> bool {
        !matches!(self.category(), ApiErrorCategory::Network)
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Network(message) => Self::Network(message),
            RosterError::Server(message) => Self::Server(message),
            RosterError::NotFound(message) => Self::NotFound(message),
            RosterError::Validation(failure) => Self::BadRequest(failure.to_string()),
            RosterError::InvalidInput(message) => Self::Client(message),
            RosterError::Config(message) => Self::Config(message),
            RosterError::Internal(message) => Self::Decode(message),
        }
    }
}

impl From<ApiError> for RosterError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Server(message) => Self::Server(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::BadRequest(message) | ApiError::Client(message) => {
                Self::InvalidInput(message)
            }
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
            ApiError::Decode(message) => Self::Internal(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Server("test".into()).category(), ApiErrorCategory::Server);
        assert_eq!(ApiError::NotFound("test".into()).category(), ApiErrorCategory::Client);
        assert_eq!(ApiError::BadRequest("{}".into()).category(), ApiErrorCategory::Client);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(5)).category(),
            ApiErrorCategory::Network
        );
        assert_eq!(ApiError::Decode("test".into()).category(), ApiErrorCategory::Config);
    }

    #[test]
    fn test_has_response() {
        assert!(ApiError::Server("test".into()).has_response());
        assert!(ApiError::BadRequest("{}".into()).has_response());
        assert!(!ApiError::Network("test".into()).has_response());
        assert!(!ApiError::Timeout(Duration::from_secs(1)).has_response());
    }

    #[test]
    fn test_into_roster_error() {
        assert!(matches!(
            RosterError::from(ApiError::Timeout(Duration::from_secs(5))),
            RosterError::Network(_)
        ));
        assert!(matches!(
            RosterError::from(ApiError::NotFound("none".into())),
            RosterError::NotFound(_)
        ));
        assert!(matches!(
            RosterError::from(ApiError::Client("409".into())),
            RosterError::InvalidInput(_)
        ));
    }
}
