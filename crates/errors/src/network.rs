//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The backend answered 503; it is still warming up (mirror sync in progress).
    #[error("service busy: {url}")]
    ServiceBusy { url: String },

    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("backend rejected request (code {code}): {message}")]
    ApiError { code: i64, message: String },

    #[error("malformed response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

impl NetworkError {
    /// Whether this error is the transient "backend busy" condition that the
    /// fixed-delay retry loop is allowed to absorb.
    #[must_use]
    pub fn is_service_busy(&self) -> bool {
        matches!(self, Self::ServiceBusy { .. })
    }
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } | Self::ConnectionRefused(_) => {
                Some("Check that the deployment service is running and reachable.")
            }
            Self::InvalidUrl(_) => Some("Fix `network.api_url` in the configuration."),
            Self::ServiceBusy { .. } => {
                Some("The deployment service is still synchronizing mirrors; try again shortly.")
            }
            Self::ApiError { .. } | Self::HttpError { .. } => {
                Some("Inspect the deployment service logs for details.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ConnectionRefused(_) | Self::ServiceBusy { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Timeout { .. } => "network.timeout",
            Self::RequestFailed(_) => "network.request_failed",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::ServiceBusy { .. } => "network.service_busy",
            Self::HttpError { .. } => "network.http_error",
            Self::ApiError { .. } => "network.api_error",
            Self::InvalidResponse { .. } => "network.invalid_response",
        })
    }
}
