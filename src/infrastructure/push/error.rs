//! # Push Errors
//!
//! Error types for push notification delivery.
//!
//! # Examples
//!
//! ```
//! use product_catalog::infrastructure::push::PushError;
//!
//! let error = PushError::timeout("Request timed out after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = PushError::rejected(401, "InvalidKey");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for push notification delivery.
#[derive(Debug, Clone, Error)]
pub enum PushError {
    /// Request timed out.
    #[error("push timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Request could not reach the endpoint.
    #[error("push connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Endpoint answered with a non-success status.
    #[error("push rejected ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Client-side failure (configuration, serialization).
    #[error("push internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl PushError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if sending the same message again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::Internal { .. } => false,
        }
    }
}

/// Result type for push operations.
pub type PushResult<T> = Result<T, PushError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        assert!(PushError::rejected(503, "").is_retryable());
        assert!(PushError::rejected(429, "").is_retryable());
        assert!(!PushError::rejected(400, "").is_retryable());
    }

    #[test]
    fn display_includes_status() {
        let error = PushError::rejected(401, "InvalidKey");
        assert_eq!(error.to_string(), "push rejected (401): InvalidKey");
    }

    #[test]
    fn internal_is_not_retryable() {
        assert!(!PushError::internal("bad header").is_retryable());
        assert!(PushError::connection("refused").is_retryable());
    }
}
