//! Default version picks

use dwiz_types::{Component, ComponentCatalog, ReleaseArtifact, StableLine};

/// Pick the default artifact for `component`
///
/// The first catalog entry is the nominal latest and wins, except for the
/// core engine when a preferred stable line is configured and at least two
/// core artifacts sit on it: then the one with the highest leading release
/// number wins, earlier entries winning ties. Releases that do not start
/// with a number rank lowest.
#[must_use]
pub fn recommend<'a>(
    component: Component,
    catalog: &'a ComponentCatalog,
    preferred_line: Option<&StableLine>,
) -> Option<&'a ReleaseArtifact> {
    let artifacts = catalog.artifacts(component)?;
    let first = artifacts.first()?;

    if component != Component::Core {
        return Some(first);
    }
    let Some(line) = preferred_line else {
        return Some(first);
    };

    let on_line: Vec<&ReleaseArtifact> = artifacts
        .iter()
        .filter(|artifact| line.matches(&artifact.version))
        .collect();
    if on_line.len() < 2 {
        return Some(first);
    }

    on_line
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.leading_release() > best.leading_release() {
                candidate
            } else {
                best
            }
        })
        .or(Some(first))
}
