use dwiz_types::{Component, Edition};
use serde::{Deserialize, Serialize};

/// Version selection events emitted by the wizard session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResolverEvent {
    /// A default artifact was picked for a component
    Recommended {
        component: Component,
        version: String,
        release: Option<String>,
    },

    /// The proxy was re-derived from a new core selection
    ProxyResolved {
        core_version: String,
        proxy_version: String,
        edition: Edition,
    },

    /// No proxy artifact matches the core; the previous proxy pick is kept
    NoCompatibleProxy {
        core_version: String,
        edition: Edition,
        kept: Option<String>,
    },

    /// The user changed the artifact of a component
    SelectionChanged {
        component: Component,
        version: String,
    },

    /// Readiness was evaluated for the current flow
    ReadinessEvaluated {
        ready: bool,
        missing: Vec<Component>,
        estimated_size_bytes: u64,
    },
}
