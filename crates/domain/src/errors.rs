//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trak_common::error::{ErrorClassification, ErrorSeverity};

/// Main error type for TRAK
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TrakError {
    /// Backend unreachable, timed out, or answered with a failure status
    #[error("Network error: {0}")]
    Network(String),

    /// Input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Task creation failed; nothing is being tracked
    #[error("Could not create task: {0}")]
    Creation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrakError {
    /// Whether this error is meant to be shown to the user
    ///
    /// Configuration and internal errors are logged only.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Validation(_) | Self::Creation(_) | Self::NotFound(_))
    }
}

impl ErrorClassification for TrakError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Creation(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(_) | Self::NotFound(_) => ErrorSeverity::Warning,
            Self::Network(_) | Self::Creation(_) | Self::Config(_) => ErrorSeverity::Error,
            Self::Internal(_) => ErrorSeverity::Critical,
        }
    }
}

/// Result type alias for TRAK operations
pub type Result<T> = std::result::Result<T, TrakError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_string(&TrakError::Validation("empty title".into())).unwrap();
        assert_eq!(json, r#"{"type":"Validation","message":"empty title"}"#);
    }

    #[test]
    fn network_failures_are_retryable_but_validation_is_not() {
        assert!(TrakError::Network("refused".into()).is_retryable());
        assert!(TrakError::Creation("timeout".into()).is_retryable());
        assert!(!TrakError::Validation("empty".into()).is_retryable());
    }

    #[test]
    fn internal_errors_are_not_user_facing() {
        assert!(!TrakError::Internal("poisoned".into()).is_user_facing());
        assert!(!TrakError::Config("bad toml".into()).is_user_facing());
        assert!(TrakError::Network("down".into()).is_user_facing());
        assert!(TrakError::Internal("x".into()).is_critical());
    }
}
