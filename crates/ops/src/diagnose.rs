//! Mirror diagnostics driver

use crate::OpsCtx;
use dwiz_errors::Error;
use dwiz_events::{AppEvent, EventEmitter, EventSource, FailureContext, MirrorEvent};
use dwiz_net::retry_while_busy_with;
use dwiz_resolver::{classify_mirrors, MirrorDiagnostic};
use dwiz_types::Component;
use tokio_util::sync::CancellationToken;

/// Explain why `missing` components have no installable artifact
///
/// Fetches the mirror status, retrying while the service is busy, and
/// classifies it against the configured mirror list. An empty result means
/// every expected mirror is configured and enabled.
///
/// # Errors
///
/// Returns an error if the mirror status cannot be fetched or `cancel` fires.
pub async fn diagnose_missing_artifacts(
    ctx: &OpsCtx,
    missing: &[Component],
    cancel: &CancellationToken,
) -> Result<Vec<MirrorDiagnostic>, Error> {
    ctx.emit(AppEvent::Mirror(MirrorEvent::DiagnosticsStarted {
        missing: missing.iter().map(ToString::to_string).collect(),
    }));

    let delay = ctx.busy_retry_delay();
    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    let report = retry_while_busy_with(
        delay,
        cancel,
        |attempt| ctx.emit_busy_retry(&EventSource::MIRROR, attempt, delay_ms),
        || ctx.api.fetch_mirror_status(),
    )
    .await;

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            ctx.emit(AppEvent::Mirror(MirrorEvent::DiagnosticsFailed {
                failure: FailureContext::from_error(&e),
            }));
            return Err(e);
        }
    };

    let policy = ctx.mirror_policy();
    let diagnostics = classify_mirrors(&report, &policy);

    ctx.emit(AppEvent::Mirror(MirrorEvent::DiagnosticsCompleted {
        total_known: report.total,
        unavailable: diagnostics
            .iter()
            .map(|diagnostic| diagnostic.mirror_name.clone())
            .collect(),
    }));

    Ok(diagnostics)
}
