use serde::{Deserialize, Serialize};

/// Catalog fetch lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    /// Requesting the component listing
    FetchStarted { url: String },

    /// The backend answered busy; another attempt follows after `delay_ms`
    FetchRetrying { attempt: u32, delay_ms: u64 },

    /// Listing normalized into a catalog
    Loaded {
        components: usize,
        artifacts: usize,
        ignored: Vec<String>,
    },

    /// Fetching failed with a non-transient error
    FetchFailed { failure: super::FailureContext },
}
