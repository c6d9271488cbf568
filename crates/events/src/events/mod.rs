use serde::{Deserialize, Serialize};

use crate::EventSource;
use dwiz_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code, e.g. `network.service_busy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod catalog;
pub mod general;
pub mod mirror;
pub mod resolver;

pub use catalog::*;
pub use general::*;
pub use mirror::*;
pub use resolver::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Component listing fetch and normalization
    Catalog(CatalogEvent),

    /// Default picks, proxy re-resolution and readiness
    Resolver(ResolverEvent),

    /// Mirror availability diagnostics
    Mirror(MirrorEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Catalog(_) => EventSource::CATALOG,
            Self::Resolver(_) => EventSource::RESOLVER,
            Self::Mirror(_) => EventSource::MIRROR,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::OperationFailed { .. })
            | Self::Catalog(CatalogEvent::FetchFailed { .. })
            | Self::Mirror(MirrorEvent::DiagnosticsFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Resolver(ResolverEvent::NoCompatibleProxy { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Catalog(CatalogEvent::FetchRetrying { .. })
            | Self::Mirror(MirrorEvent::StatusRetrying { .. })
            | Self::Resolver(ResolverEvent::ReadinessEvaluated { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }
}
