//! Structured logging integration for events
//!
//! Domain events are turned into tracing records with structured fields so
//! `--debug` output can be filtered and consumed by log tooling.

use dwiz_events::{
    AppEvent, CatalogEvent, EventMeta, GeneralEvent, MirrorEvent, ResolverEvent,
};
use tracing::{debug, error, info, trace, warn};

/// Log an `AppEvent` through tracing with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let meta = EventMeta::new(event.log_level(), event.event_source());
    let level = meta.tracing_level();

    match event {
        AppEvent::Catalog(catalog_event) => match catalog_event {
            CatalogEvent::FetchStarted { url } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    url = %url,
                    "Component listing requested"
                );
            }
            CatalogEvent::FetchRetrying { attempt, delay_ms } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    attempt,
                    delay_ms,
                    "Deployment service busy, retrying component listing"
                );
            }
            CatalogEvent::Loaded {
                components,
                artifacts,
                ignored,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    components,
                    artifacts,
                    ignored = ?ignored,
                    "Catalog loaded"
                );
            }
            CatalogEvent::FetchFailed { failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Component listing failed"
                );
            }
        },

        AppEvent::Resolver(resolver_event) => match resolver_event {
            ResolverEvent::Recommended {
                component,
                version,
                release,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    component = %component,
                    version = %version,
                    release = ?release,
                    "Recommended version"
                );
            }
            ResolverEvent::ProxyResolved {
                core_version,
                proxy_version,
                edition,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    core_version = %core_version,
                    proxy_version = %proxy_version,
                    edition = %edition,
                    "Proxy follows core"
                );
            }
            ResolverEvent::NoCompatibleProxy {
                core_version,
                edition,
                kept,
            } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    core_version = %core_version,
                    edition = %edition,
                    kept = ?kept,
                    "No proxy matches the selected core"
                );
            }
            _ => {
                log_at_level(level, &meta, event);
            }
        },

        AppEvent::Mirror(mirror_event) => match mirror_event {
            MirrorEvent::DiagnosticsFailed { failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    "Mirror diagnostics failed"
                );
            }
            MirrorEvent::DiagnosticsCompleted {
                total_known,
                unavailable,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    total_known,
                    unavailable = ?unavailable,
                    "Mirror diagnostics completed"
                );
            }
            _ => {
                log_at_level(level, &meta, event);
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::OperationFailed { operation, failure } => {
                if failure.retryable {
                    warn!(
                        source = meta.source.as_str(),
                        event_id = %meta.event_id,
                        operation = %operation,
                        code = ?failure.code,
                        message = %failure.message,
                        hint = ?failure.hint,
                        "Operation failed"
                    );
                } else {
                    error!(
                        source = meta.source.as_str(),
                        event_id = %meta.event_id,
                        operation = %operation,
                        code = ?failure.code,
                        message = %failure.message,
                        hint = ?failure.hint,
                        "Operation failed"
                    );
                }
            }
            GeneralEvent::Warning { message, context } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    message = %message,
                    context = ?context,
                    "Warning"
                );
            }
            _ => {
                log_at_level(level, &meta, event);
            }
        },
    }
}

fn log_at_level(level: tracing::Level, meta: &EventMeta, event: &AppEvent) {
    let source = meta.source.as_str();
    match level {
        tracing::Level::ERROR => {
            error!(source, event_id = %meta.event_id, event = ?event, "Application event");
        }
        tracing::Level::WARN => {
            warn!(source, event_id = %meta.event_id, event = ?event, "Application event");
        }
        tracing::Level::INFO => {
            info!(source, event_id = %meta.event_id, event = ?event, "Application event");
        }
        tracing::Level::DEBUG => {
            debug!(source, event_id = %meta.event_id, event = ?event, "Application event");
        }
        tracing::Level::TRACE => {
            trace!(source, event_id = %meta.event_id, event = ?event, "Application event");
        }
    }
}
