//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ValidationFailure;

/// Main error type for rota
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RosterError {
    /// No response reached the client (connect failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a 5xx status.
    #[error("Server error: {0}")]
    Server(String),

    /// The service found nothing for the requested scope.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Structured rejection of a create request.
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    /// Stable label for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Server(_) => "server",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// True when the failure means "no data for this range" rather than a fault.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for rota operations
pub type Result<T> = std::result::Result<T, RosterError>;
