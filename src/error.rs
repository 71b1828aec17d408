//! Error types for pagewalk
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Binding errors mean a client/request pair does not follow the pagination
//! convention and are never retried. Failures raised by the remote operation
//! itself travel as [`Error::Client`] and are sorted into benign or fatal by
//! [`crate::classify::classify`].

use crate::classify::ClientError;
use thiserror::Error;

/// The main error type for pagewalk
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Binding Errors
    // ============================================================================
    #[error("No member of {owner} matches {query}")]
    NoBindingFound { owner: String, query: String },

    #[error("Multiple members of {owner} match {query}: {}", .candidates.join(", "))]
    AmbiguousBinding {
        owner: String,
        query: String,
        candidates: Vec<String>,
    },

    #[error("No result type '{expected}' is registered for request {request}")]
    ResultTypeNotFound { request: String, expected: String },

    #[error("Member '{member}' was invoked with a value that is not {expected}")]
    SignatureMismatch { member: String, expected: String },

    // ============================================================================
    // Invocation Errors
    // ============================================================================
    #[error("Remote call failed: {0}")]
    Client(#[from] ClientError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a no-binding error
    pub fn no_binding(owner: impl Into<String>, query: impl Into<String>) -> Self {
        Self::NoBindingFound {
            owner: owner.into(),
            query: query.into(),
        }
    }

    /// Create an ambiguous binding error
    pub fn ambiguous(
        owner: impl Into<String>,
        query: impl Into<String>,
        candidates: Vec<String>,
    ) -> Self {
        Self::AmbiguousBinding {
            owner: owner.into(),
            query: query.into(),
            candidates,
        }
    }

    /// Create a signature mismatch error
    pub fn signature(member: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::SignatureMismatch {
            member: member.into(),
            expected: expected.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error comes from resolving a pagination binding
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Error::NoBindingFound { .. }
                | Error::AmbiguousBinding { .. }
                | Error::ResultTypeNotFound { .. }
                | Error::SignatureMismatch { .. }
        )
    }

    /// The remote failure carried by this error, if any
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Error::Client(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for pagewalk
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClientErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required config field: base_url");

        let err = Error::ambiguous(
            "ListWidgetsResponse",
            "fn() -> Option<String>",
            vec!["next_token".to_string(), "next_marker".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Multiple members of ListWidgetsResponse match fn() -> Option<String>: next_token, next_marker"
        );
    }

    #[test]
    fn test_is_binding_error() {
        assert!(Error::no_binding("Client", "fn(Request) -> Response").is_binding_error());
        assert!(Error::ambiguous("Response", "fn()", vec![]).is_binding_error());
        assert!(Error::ResultTypeNotFound {
            request: "ListThingsRequest".to_string(),
            expected: "ListThingsResponse".to_string(),
        }
        .is_binding_error());
        assert!(Error::signature("list_things", "ListThingsRequest").is_binding_error());

        assert!(!Error::config("test").is_binding_error());
        assert!(!Error::from(ClientError::unreachable("down")).is_binding_error());
    }

    #[test]
    fn test_client_error_accessor() {
        let err = Error::from(ClientError::new(ClientErrorKind::Unauthorized, "denied"));
        assert_eq!(
            err.client_error().map(ClientError::kind),
            Some(ClientErrorKind::Unauthorized)
        );
        assert!(Error::config("x").client_error().is_none());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
