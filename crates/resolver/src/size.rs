//! Installed footprint of a selection

use dwiz_types::{Component, Selection};

/// Sum of the selected artifacts' sizes over `active` components
///
/// Unselected components contribute nothing. A component listed twice in
/// `active` is counted once.
#[must_use]
pub fn total_estimated_size(selection: &Selection, active: &[Component]) -> u64 {
    Component::ALL
        .into_iter()
        .filter(|component| active.contains(component))
        .filter_map(|component| selection.get(component))
        .map(|artifact| artifact.estimated_size_bytes)
        .fold(0u64, u64::saturating_add)
}

/// Render a byte count as mebibytes with two decimals
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_mebibytes(bytes: u64) -> String {
    format!("{:.2} MiB", bytes as f64 / 1024.0 / 1024.0)
}
