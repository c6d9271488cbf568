//! Draft deployment housekeeping

use crate::{DraftList, OpsCtx};
use dwiz_errors::{Error, OpsError};
use dwiz_events::EventEmitter;

const DRAFT_STATUS: &str = "DRAFT";

/// Deployments an interrupted wizard run left in draft status
///
/// # Errors
///
/// Returns an error if the deployment list cannot be fetched.
pub async fn list_drafts(ctx: &OpsCtx) -> Result<DraftList, Error> {
    let drafts = ctx.api.fetch_deployments_by_status(DRAFT_STATUS).await?;
    ctx.emit_debug(format!("found {} draft deployment(s)", drafts.len()));
    Ok(DraftList { drafts })
}

/// Delete the draft deployment `name`
///
/// Only drafts can be discarded; a running or finished deployment with the
/// same name is reported as not found.
///
/// # Errors
///
/// Returns an error if no draft is named `name` or the delete call fails.
pub async fn discard_draft(ctx: &OpsCtx, name: &str) -> Result<(), Error> {
    ctx.emit_operation_started(format!("discard_draft {name}"));

    let drafts = ctx.api.fetch_deployments_by_status(DRAFT_STATUS).await?;
    if !drafts.iter().any(|draft| draft.name == name) {
        let err: Error = OpsError::DraftNotFound {
            name: name.to_string(),
        }
        .into();
        ctx.emit_operation_failed(format!("discard_draft {name}"), &err);
        return Err(err);
    }

    ctx.api.delete_deployment(name).await?;
    ctx.emit_operation_completed(format!("discard_draft {name}"), true);
    Ok(())
}
