//! Types for operations and results

use dwiz_resolver::{MirrorDiagnostic, WizardSession};
use dwiz_types::api::{ConnectionInfo, DeploymentInfo};
use dwiz_types::{Component, Flow};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of loading the catalog for a wizard run
#[derive(Debug, Clone)]
pub struct WizardReport {
    /// Seeded session, ready for user selections
    pub session: WizardSession,
    /// Backend component names that map to no role
    pub ignored_components: Vec<String>,
    /// Time spent fetching and seeding, in milliseconds
    pub duration_ms: u64,
}

impl WizardReport {
    /// Serializable view of the current session state
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_session(&self.session, &self.ignored_components)
    }

    /// Every artifact of the catalog, marking the selected ones
    #[must_use]
    pub fn listing(&self) -> CatalogListing {
        let selection = self.session.selection();
        let components = self
            .session
            .catalog()
            .iter()
            .map(|(component, artifacts)| {
                let selected = selection.get(component);
                let listed = artifacts
                    .iter()
                    .map(|artifact| ListedArtifact {
                        key: artifact.key().to_string(),
                        version: artifact.display_version(),
                        edition: artifact.edition.to_string(),
                        estimated_size: artifact.estimated_size_bytes,
                        selected: selected == Some(artifact),
                    })
                    .collect();
                (component, listed)
            })
            .collect();
        CatalogListing { components }
    }
}

/// One artifact row of a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedArtifact {
    pub key: String,
    pub version: String,
    pub edition: String,
    pub estimated_size: u64,
    pub selected: bool,
}

/// Catalog contents grouped by component
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogListing {
    pub components: BTreeMap<Component, Vec<ListedArtifact>>,
}

/// One selected component in a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedVersion {
    pub key: String,
    pub version: String,
    pub release: Option<String>,
    pub edition: String,
    pub estimated_size: u64,
}

/// Snapshot of a session for output
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub flow: Flow,
    pub selection: BTreeMap<Component, SelectedVersion>,
    pub ready: bool,
    pub missing: Vec<Component>,
    pub diagnostics: Vec<MirrorDiagnostic>,
    pub estimated_size_bytes: u64,
    pub low_version: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_components: Vec<String>,
}

impl SessionSummary {
    #[must_use]
    pub fn from_session(session: &WizardSession, ignored: &[String]) -> Self {
        let selection = session
            .selection()
            .iter()
            .map(|(component, artifact)| {
                (
                    component,
                    SelectedVersion {
                        key: artifact.key().to_string(),
                        version: artifact.version.clone(),
                        release: artifact.release.clone(),
                        edition: artifact.edition.to_string(),
                        estimated_size: artifact.estimated_size_bytes,
                    },
                )
            })
            .collect();

        let missing = session.missing_components();
        Self {
            flow: session.flow(),
            selection,
            ready: missing.is_empty(),
            missing,
            diagnostics: session.diagnostics().to_vec(),
            estimated_size_bytes: session.estimated_size(),
            low_version: session.is_low_version(),
            ignored_components: ignored.to_vec(),
        }
    }
}

/// Draft deployments left behind by interrupted wizard runs
#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftList {
    pub drafts: Vec<DeploymentInfo>,
}

/// Connection parameters for the upgrade flow
///
/// The password never leaves this type through `Serialize`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionSummary {
    pub cluster_name: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub has_password: bool,
}

impl From<ConnectionInfo> for ConnectionSummary {
    fn from(info: ConnectionInfo) -> Self {
        Self {
            cluster_name: info.cluster_name,
            host: info.host,
            port: info.port,
            database: info.database,
            user: info.user,
            has_password: !info.password.is_empty(),
        }
    }
}
