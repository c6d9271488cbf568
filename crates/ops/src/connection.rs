//! Upgrade flow prefill

use crate::{ConnectionSummary, OpsCtx};
use dwiz_errors::Error;

/// Connection parameters of `cluster`, used to prefill the upgrade flow
///
/// # Errors
///
/// Returns an error if the service does not know the cluster.
pub async fn connection_info(ctx: &OpsCtx, cluster: &str) -> Result<ConnectionSummary, Error> {
    let info = ctx.api.fetch_connection_info(cluster).await?;
    tracing::debug!(cluster, host = %info.host, port = info.port, "connection info");
    Ok(ConnectionSummary::from(info))
}
