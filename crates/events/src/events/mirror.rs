use serde::{Deserialize, Serialize};

/// Mirror diagnostics events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MirrorEvent {
    /// Diagnostics started because a required component has no artifact
    DiagnosticsStarted { missing: Vec<String> },

    /// Mirror service busy; retrying after `delay_ms`
    StatusRetrying { attempt: u32, delay_ms: u64 },

    /// Diagnostics finished
    DiagnosticsCompleted {
        total_known: usize,
        unavailable: Vec<String>,
    },

    /// Mirror status could not be fetched
    DiagnosticsFailed { failure: super::FailureContext },
}
