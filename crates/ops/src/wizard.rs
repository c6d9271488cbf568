//! Catalog loading and session seeding

use crate::diagnose::diagnose_missing_artifacts;
use crate::{OpsCtx, WizardReport};
use dwiz_catalog::{normalize, unknown_components, CatalogOptions};
use dwiz_errors::Error;
use dwiz_events::{AppEvent, CatalogEvent, EventEmitter, EventSource};
use dwiz_net::retry_while_busy_with;
use dwiz_resolver::WizardSession;
use dwiz_types::api::RawComponent;
use dwiz_types::Flow;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Fetch the component listing and seed a wizard session for `flow`
///
/// A busy backend is retried until it answers or `cancel` fires. When the
/// seeded selection leaves a required component without an artifact, mirror
/// diagnostics run before returning.
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched or normalized, if the
/// mirror status cannot be fetched, or if `cancel` fires.
pub async fn load_catalog(
    ctx: &OpsCtx,
    flow: Flow,
    cancel: &CancellationToken,
) -> Result<WizardReport, Error> {
    let start = Instant::now();
    ctx.emit_operation_started("load_catalog");

    let raw = match fetch_listing(ctx, cancel).await {
        Ok(raw) => raw,
        Err(e) => {
            ctx.emit(AppEvent::Catalog(CatalogEvent::FetchFailed {
                failure: dwiz_events::FailureContext::from_error(&e),
            }));
            return Err(e);
        }
    };

    let options = CatalogOptions::from_config(&ctx.config.catalog)?;
    let catalog = normalize(&raw, &options)?;
    let ignored = unknown_components(&raw, &options);

    ctx.emit(AppEvent::Catalog(CatalogEvent::Loaded {
        components: catalog.len(),
        artifacts: catalog.artifact_count(),
        ignored: ignored.clone(),
    }));
    if !ignored.is_empty() {
        ctx.emit_warning_with_context("ignoring unknown components", ignored.join(", "));
    }

    let mut session = WizardSession::with_events(
        catalog,
        flow,
        ctx.resolver_policy(),
        Some(ctx.tx.clone()),
    );

    if !session.evaluate_readiness() {
        let missing = session.missing_components();
        let diagnostics = diagnose_missing_artifacts(ctx, &missing, cancel).await?;
        session.set_diagnostics(diagnostics);
    }

    ctx.emit_operation_completed("load_catalog", true);

    Ok(WizardReport {
        session,
        ignored_components: ignored,
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

async fn fetch_listing(
    ctx: &OpsCtx,
    cancel: &CancellationToken,
) -> Result<Vec<RawComponent>, Error> {
    ctx.emit(AppEvent::Catalog(CatalogEvent::FetchStarted {
        url: ctx.config.network.api_url.clone(),
    }));

    let delay = ctx.busy_retry_delay();
    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    retry_while_busy_with(
        delay,
        cancel,
        |attempt| ctx.emit_busy_retry(&EventSource::CATALOG, attempt, delay_ms),
        || ctx.api.fetch_component_catalog(),
    )
    .await
}
