#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in dwiz
//!
//! Library crates never print. They emit `AppEvent`s on an unbounded
//! channel and the CLI decides how to render or log them.
//!
//! ## Architecture
//!
//! - **Domain-driven events**: grouped by functional domain (catalog, resolver, mirror)
//! - **Unified `EventEmitter` trait**: one API whether you hold a sender or a context
//! - **Tracing integration**: every event knows its log level and target

pub mod meta;
pub use meta::{EventMeta, EventSource};

pub mod events;
pub use events::{AppEvent, CatalogEvent, FailureContext, GeneralEvent, MirrorEvent, ResolverEvent};

use dwiz_types::Component;
use tokio::sync::mpsc::UnboundedSender;

/// Sending half of the application event channel
pub type EventSender = UnboundedSender<AppEvent>;

/// Receiving half of the application event channel
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout dwiz
///
/// Implemented for the raw `EventSender` and for any struct that carries an
/// optional sender, so resolver code can run with or without a listener.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Receiver gone means nobody is listening; keep going.
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::DebugLog {
            message: message.into(),
        }));
    }

    /// Emit a warning with the values it concerns
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::Warning {
            message: message.into(),
            context: Some(context.into()),
        }));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event built from a user-facing error
    fn emit_operation_failed<E>(&self, operation: impl Into<String>, error: &E)
    where
        E: dwiz_errors::UserFacingError + ?Sized,
    {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            failure: FailureContext::from_error(error),
        }));
    }

    /// Emit a recommendation event
    fn emit_recommended(&self, component: Component, version: &str, release: Option<&str>) {
        self.emit(AppEvent::Resolver(ResolverEvent::Recommended {
            component,
            version: version.to_string(),
            release: release.map(str::to_string),
        }));
    }

    /// Emit a busy-retry event for the given domain
    fn emit_busy_retry(&self, source: &EventSource, attempt: u32, delay_ms: u64) {
        let event = if *source == EventSource::MIRROR {
            AppEvent::Mirror(MirrorEvent::StatusRetrying { attempt, delay_ms })
        } else {
            AppEvent::Catalog(CatalogEvent::FetchRetrying { attempt, delay_ms })
        };
        self.emit(event);
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
