use serde::{Deserialize, Serialize};

/// Cross-domain notices and operation lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    Warning {
        message: String,
        context: Option<String>,
    },

    DebugLog { message: String },

    OperationStarted { operation: String },

    OperationCompleted { operation: String, success: bool },

    OperationFailed {
        operation: String,
        failure: super::FailureContext,
    },
}
