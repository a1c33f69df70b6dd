//! REST-specific error types
//!
//! Failures are classified by HTTP status so the caller can tell a rejected
//! request from an unavailable backend. They become `TrakError` at the port
//! boundary.

use std::time::Duration;

use thiserror::Error;
use trak_common::error::{ErrorClassification, ErrorSeverity};
use trak_domain::TrakError;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 4xx - the request was rejected
    Client,
    /// 5xx - the backend failed
    Server,
    /// Connection failures and timeouts
    Network,
    /// The body did not match the expected shape
    Decode,
}

/// REST operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{url} returned status {status}: {message}")]
    Client { status: u16, url: String, message: String },

    #[error("{url} returned status {status}: {message}")]
    Server { status: u16, url: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Get the error category for this error
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Client { .. } => ApiErrorCategory::Client,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorClassification for ApiError {
    fn is_retryable(&self) -> bool {
        matches!(self.category(), ApiErrorCategory::Server | ApiErrorCategory::Network)
    }

    fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ApiErrorCategory::Client => ErrorSeverity::Warning,
            ApiErrorCategory::Server | ApiErrorCategory::Network => ErrorSeverity::Error,
            ApiErrorCategory::Decode => ErrorSeverity::Critical,
        }
    }
}

impl From<ApiError> for TrakError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(404) => Self::NotFound(err.to_string()),
            Some(400 | 422) => Self::Validation(err.to_string()),
            _ => Self::Network(err.to_string()),
        }
    }
}
