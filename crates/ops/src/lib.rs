#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for dwiz
//!
//! This crate sits between the CLI and the library crates. Each operation
//! takes an `OpsCtx`, talks to the deployment service through its
//! `DeployApi`, and reports progress as events.

mod connection;
mod context;
mod diagnose;
mod drafts;
mod types;
mod wizard;

pub use connection::connection_info;
pub use context::{OpsContextBuilder, OpsCtx};
pub use diagnose::diagnose_missing_artifacts;
pub use drafts::{discard_draft, list_drafts};
pub use types::{
    CatalogListing, ConnectionSummary, DraftList, ListedArtifact, SelectedVersion, SessionSummary,
    WizardReport,
};
pub use wizard::load_catalog;

use dwiz_errors::Error;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OperationResult {
    /// Seeded wizard session
    Session(SessionSummary),
    /// Installable artifacts per component
    Catalog(CatalogListing),
    /// Pending draft deployments
    Drafts(DraftList),
    /// Upgrade flow prefill
    Connection(ConnectionSummary),
    /// Generic success message
    Success(String),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the result lets the wizard move on
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::Session(summary) => summary.ready,
            OperationResult::Catalog(_)
            | OperationResult::Drafts(_)
            | OperationResult::Connection(_)
            | OperationResult::Success(_) => true,
        }
    }
}
