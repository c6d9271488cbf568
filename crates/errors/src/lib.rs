#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the dwiz deployment wizard
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone so they can travel inside events.

use std::borrow::Cow;

use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod network;
pub mod ops;
pub mod selection;

// Re-export all error types at the root
pub use catalog::CatalogError;
pub use config::ConfigError;
pub use network::NetworkError;
pub use ops::OpsError;
pub use selection::SelectionError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("ops error: {0}")]
    Ops(#[from] OpsError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error is the transient "service busy" backend condition
    #[must_use]
    pub fn is_service_busy(&self) -> bool {
        matches!(self, Self::Network(err) if err.is_service_busy())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias for dwiz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Network(err) => err.user_message(),
            Error::Catalog(err) => err.user_message(),
            Error::Selection(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Ops(err) => err.user_message(),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_hint(),
            Error::Catalog(err) => err.user_hint(),
            Error::Selection(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Ops(err) => err.user_hint(),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(err) => err.is_retryable(),
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_code(),
            Error::Catalog(err) => err.user_code(),
            Error::Selection(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Ops(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
            Error::Cancelled => Some("error.cancelled"),
        }
    }
}
