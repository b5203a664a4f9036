//! HTTP client for the backend REST API
//!
//! The backend owns articles, favorites, search history, and crawl
//! sources; this frontend only proxies. The client wraps [`reqwest`] with
//! a bounded timeout and retry policy so a slow or absent backend degrades
//! into empty page state instead of a hung request.

mod client;

pub use client::{BackendClient, ClientConfig};

use thiserror::Error;

use crate::error::{ErrorCategory, KabarErrorTrait};

/// Errors from the backend API client
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP client could not be constructed
    #[error("Client initialization failed: {0}")]
    Init(String),

    /// Connection-level failure (DNS, refused, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Backend replied with a non-success status
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend is known to be down (health check failed)
    #[error("Backend unavailable")]
    Unavailable,
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl KabarErrorTrait for BackendError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Init(_) | Self::Parse(_) => false,
            Self::Network(_) | Self::Timeout | Self::Unavailable => true,
            // Server-side failures may clear up; client errors will not
            Self::Http { status, .. } => *status >= 500,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Init(msg) => format!("{}: {msg}", crate::i18n::t!("errors.backend.init")),
            Self::Network(msg) => {
                format!("{}: {msg}", crate::i18n::t!("errors.backend.network"))
            }
            Self::Timeout => crate::i18n::t!("errors.backend.timeout").to_string(),
            Self::Http { status, .. } => {
                format!("{} ({status})", crate::i18n::t!("errors.backend.http"))
            }
            Self::Parse(msg) => format!("{}: {msg}", crate::i18n::t!("errors.backend.parse")),
            Self::Unavailable => crate::i18n::t!("errors.backend.unavailable").to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_recoverable() {
        let err = BackendError::Http {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_recoverable());

        let err = BackendError::Http {
            status: 404,
            message: "not found".into(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_category_is_network() {
        assert_eq!(BackendError::Timeout.category(), ErrorCategory::Network);
    }
}
