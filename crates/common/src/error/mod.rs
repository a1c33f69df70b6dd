//! Error classification shared by every TRAK error type.
//!
//! Concrete error enums live next to the code that raises them
//! (`TrakError` in the domain crate, `ApiError` in infra). This module only
//! provides the vocabulary used to decide how a failure is surfaced: whether
//! it is worth retrying by hand and how loudly it should be logged.

use std::fmt;

/// Trait for classifying errors by retry behaviour and severity
///
/// # Examples
///
/// ```
/// use trak_common::error::{ErrorClassification, ErrorSeverity};
///
/// struct Offline;
///
/// impl ErrorClassification for Offline {
///     fn is_retryable(&self) -> bool {
///         true
///     }
///
///     fn severity(&self) -> ErrorSeverity {
///         ErrorSeverity::Warning
///     }
/// }
///
/// assert!(Offline.is_retryable());
/// assert!(!Offline.is_critical());
/// ```
pub trait ErrorClassification {
    /// Check if this error is transient
    ///
    /// Retryable errors may succeed if the user repeats the action, such as
    /// connection failures, timeouts or a 5xx from the backend. The client
    /// never repeats mutations on its own.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Error severity levels for logging and notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ErrorSeverity);

    impl ErrorClassification for Fixed {
        fn is_retryable(&self) -> bool {
            false
        }

        fn severity(&self) -> ErrorSeverity {
            self.0
        }
    }

    #[test]
    fn severity_display_uses_log_labels() {
        assert_eq!(ErrorSeverity::Info.to_string(), "INFO");
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
        assert_eq!(ErrorSeverity::Error.to_string(), "ERROR");
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn severity_is_ordered() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
    }

    #[test]
    fn only_critical_severity_is_critical() {
        assert!(Fixed(ErrorSeverity::Critical).is_critical());
        assert!(!Fixed(ErrorSeverity::Error).is_critical());
    }
}
