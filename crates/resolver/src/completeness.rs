//! Readiness of a selection for a flow

use dwiz_types::{Component, ComponentCatalog, Selection};

/// Required components lacking a selection or any catalog artifact, in role order
#[must_use]
pub fn missing_components(
    selection: &Selection,
    catalog: &ComponentCatalog,
    required: &[Component],
) -> Vec<Component> {
    let mut missing: Vec<Component> = required
        .iter()
        .copied()
        .filter(|component| {
            !selection.contains(*component) || !catalog.has_artifacts(*component)
        })
        .collect();
    missing.sort_unstable();
    missing.dedup();
    missing
}

/// Whether every required component is selected and installable
#[must_use]
pub fn is_complete(
    selection: &Selection,
    catalog: &ComponentCatalog,
    required: &[Component],
) -> bool {
    missing_components(selection, catalog, required).is_empty()
}
