//! Normalized catalog and the wizard's per-component selection

use crate::{ArtifactKey, Component, ReleaseArtifact};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Installable artifacts per component, in server order
///
/// A component that maps to an empty list is known to the backend but has
/// nothing installable; that differs from a component that is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentCatalog {
    entries: BTreeMap<Component, Vec<ReleaseArtifact>>,
}

impl ComponentCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the artifact list of a component
    pub fn insert(&mut self, component: Component, artifacts: Vec<ReleaseArtifact>) {
        self.entries.insert(component, artifacts);
    }

    /// Artifacts of a component, `None` if the backend did not report it
    #[must_use]
    pub fn artifacts(&self, component: Component) -> Option<&[ReleaseArtifact]> {
        self.entries.get(&component).map(Vec::as_slice)
    }

    /// Whether the component is present with at least one artifact
    #[must_use]
    pub fn has_artifacts(&self, component: Component) -> bool {
        self.artifacts(component)
            .is_some_and(|artifacts| !artifacts.is_empty())
    }

    #[must_use]
    pub fn contains(&self, component: Component) -> bool {
        self.entries.contains_key(&component)
    }

    /// Look up an artifact of a component by key
    #[must_use]
    pub fn find(&self, component: Component, key: &ArtifactKey) -> Option<&ReleaseArtifact> {
        self.artifacts(component)?
            .iter()
            .find(|artifact| artifact.matches_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &[ReleaseArtifact])> {
        self.entries
            .iter()
            .map(|(component, artifacts)| (*component, artifacts.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of artifacts across all components
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Currently chosen artifact per component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    entries: BTreeMap<Component, ReleaseArtifact>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, component: Component) -> Option<&ReleaseArtifact> {
        self.entries.get(&component)
    }

    /// Overwrite the entry of a component, returning the previous one
    pub fn set(
        &mut self,
        component: Component,
        artifact: ReleaseArtifact,
    ) -> Option<ReleaseArtifact> {
        self.entries.insert(component, artifact)
    }

    pub fn clear(&mut self, component: Component) -> Option<ReleaseArtifact> {
        self.entries.remove(&component)
    }

    #[must_use]
    pub fn contains(&self, component: Component) -> bool {
        self.entries.contains_key(&component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &ReleaseArtifact)> {
        self.entries
            .iter()
            .map(|(component, artifact)| (*component, artifact))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
