//! Unified error handling for the kabar crate
//!
//! This module provides a unified error type that consolidates all
//! domain-specific errors into a single `Error` enum, while maintaining the
//! ability to use domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`KabarErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::backend::BackendError;
pub use crate::web::session::SessionError;

/// Common trait for all kabar error types
///
/// This trait provides a unified interface for error handling across
/// all modules, enabling consistent error processing strategies.
pub trait KabarErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Backend API and network errors (HTTP, timeout)
    Network,
    /// Template and view rendering errors
    Rendering,
    /// Session and authentication errors
    Session,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Network => crate::i18n::t!("errors.category.network").to_string(),
            Self::Rendering => crate::i18n::t!("errors.category.rendering").to_string(),
            Self::Session => crate::i18n::t!("errors.category.session").to_string(),
            Self::Config => crate::i18n::t!("errors.category.config").to_string(),
            Self::Other => crate::i18n::t!("errors.category.other").to_string(),
        }
    }
}

/// Unified error type for the kabar crate
///
/// This enum wraps all domain-specific errors, providing a single error type
/// that can be used across module boundaries while preserving the detailed
/// error information.
#[derive(Error, Debug)]
pub enum Error {
    /// Backend API client errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Session and authentication errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Template registration errors
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// View rendering errors
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl KabarErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_recoverable(),
            Self::Session(_) => false,
            Self::Template(_) | Self::Render(_) => false,
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) => false,
            Self::Http(_) => true, // HTTP errors are often transient
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Backend(e) => e.localized_desc(),
            Self::Session(e) => {
                format!("{}: {e}", crate::i18n::t!("errors.session.error"))
            }
            Self::Template(e) => format!("{}: {e}", crate::i18n::t!("errors.render.error")),
            Self::Render(e) => format!("{}: {e}", crate::i18n::t!("errors.render.error")),
            Self::Io(e) => format!("{}: {e}", crate::i18n::t!("errors.io.error")),
            Self::Json(e) => format!("{}: {e}", crate::i18n::t!("errors.json.error")),
            Self::Http(e) => format!("{}: {e}", crate::i18n::t!("errors.http.error")),
            Self::Config(msg) => format!("{}: {msg}", crate::i18n::t!("errors.config.error")),
            Self::Other { context, .. } => context.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Backend(_) | Self::Http(_) => ErrorCategory::Network,
            Self::Session(_) => ErrorCategory::Session,
            Self::Template(_) | Self::Render(_) => ErrorCategory::Rendering,
            Self::Io(_) | Self::Json(_) | Self::Other { .. } => ErrorCategory::Other,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Conversion from handlebars::TemplateError (boxed: the error is large)
impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let backend_err = Error::Backend(BackendError::Timeout);
        assert_eq!(backend_err.category(), ErrorCategory::Network);

        let config_err = Error::config("missing bind address");
        assert_eq!(config_err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_is_recoverable() {
        let backend_err = Error::Backend(BackendError::Timeout);
        assert!(backend_err.is_recoverable());

        let session_err = Error::Session(SessionError::Expired);
        assert!(!session_err.is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let backend_err = BackendError::Unavailable;
        let unified: Error = backend_err.into();
        assert!(matches!(unified, Error::Backend(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("invalid backend URL");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("Something went wrong");
        assert_eq!(err.category(), ErrorCategory::Other);
    }
}
