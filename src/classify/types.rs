//! Client error types
//!
//! A `ClientError` is what a client adapter returns when a remote call fails.
//! The `kind` is the structured signal the classifier looks at.

use super::classifier::infer_kind;
use std::fmt;
use thiserror::Error;

/// Broad category of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientErrorKind {
    /// The transport could not reach the remote endpoint at all
    Unreachable,
    /// The endpoint was reached but did not answer in time
    Timeout,
    /// Credentials were rejected or lack permissions
    Unauthorized,
    /// The request was structurally valid but refused by the service
    Rejected,
    /// The response could not be understood
    Malformed,
    /// Anything else
    Other,
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClientErrorKind::Unreachable => "endpoint unreachable",
            ClientErrorKind::Timeout => "timed out",
            ClientErrorKind::Unauthorized => "unauthorized",
            ClientErrorKind::Rejected => "rejected",
            ClientErrorKind::Malformed => "malformed response",
            ClientErrorKind::Other => "client error",
        };
        f.write_str(label)
    }
}

/// Failure of a single remote call
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct ClientError {
    kind: ClientErrorKind,
    status: Option<u16>,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ClientError {
    /// Create an error of the given kind
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create an unreachable-endpoint error
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Unreachable, message)
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Malformed, message)
    }

    /// Create an error from a non-success status code
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ClientErrorKind::Unauthorized,
            408 => ClientErrorKind::Timeout,
            _ => ClientErrorKind::Rejected,
        };
        Self {
            status: Some(status),
            ..Self::new(kind, format!("HTTP {status}: {}", body.into()))
        }
    }

    /// Create an error for a transport that only reports a message.
    ///
    /// The kind is inferred from well-known message patterns and falls back to
    /// [`ClientErrorKind::Other`]. Prefer [`ClientError::new`] whenever the
    /// transport exposes a structured failure.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(infer_kind(&message), message)
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attach a status code
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> ClientErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
