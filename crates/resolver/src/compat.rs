//! Core/proxy compatibility

use dwiz_types::{Component, ComponentCatalog, ReleaseArtifact, Selection};
use serde::{Deserialize, Serialize};

/// What a core change did to the proxy selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ProxyOutcome {
    /// Edition and compatibility positions equal the previous core; nothing re-run
    Unchanged,
    /// A compatible proxy was selected
    Resolved { proxy: ReleaseArtifact },
    /// No proxy matches; the previous proxy selection is kept as is
    NoCompatibleCandidate,
}

/// Selection after a core change, with the proxy outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreChange {
    pub selection: Selection,
    pub outcome: ProxyOutcome,
}

/// Version characters compared between core and proxy
const COMPAT_POSITIONS: [usize; 2] = [0, 2];

fn compat_signature(artifact: &ReleaseArtifact) -> [Option<char>; 2] {
    COMPAT_POSITIONS.map(|position| artifact.version_char(position))
}

/// Whether `proxy` can run in front of `core`
///
/// Same edition, and the raw version strings agree at character positions 0
/// and 2. This is a positional match on the version text, not a parse.
#[must_use]
pub fn is_proxy_compatible(core: &ReleaseArtifact, proxy: &ReleaseArtifact) -> bool {
    core.edition == proxy.edition && compat_signature(core) == compat_signature(proxy)
}

/// Whether switching from `previous` to `next` core needs a new proxy
#[must_use]
pub fn needs_reresolution(previous: Option<&ReleaseArtifact>, next: &ReleaseArtifact) -> bool {
    previous.is_none_or(|prev| {
        prev.edition != next.edition || compat_signature(prev) != compat_signature(next)
    })
}

/// First proxy in catalog order compatible with `core`
#[must_use]
pub fn find_compatible_proxy<'a>(
    core: &ReleaseArtifact,
    catalog: &'a ComponentCatalog,
) -> Option<&'a ReleaseArtifact> {
    catalog
        .artifacts(Component::Proxy)?
        .iter()
        .find(|proxy| is_proxy_compatible(core, proxy))
}

/// Apply a new core selection and re-derive the proxy
///
/// The core entry is always set to `new_core`. The proxy is recomputed only
/// when edition or compatibility positions moved; when nothing matches the
/// old proxy stays selected.
#[must_use]
pub fn on_core_version_changed(
    new_core: &ReleaseArtifact,
    catalog: &ComponentCatalog,
    selection: &Selection,
) -> CoreChange {
    let mut updated = selection.clone();
    let reresolve = needs_reresolution(selection.get(Component::Core), new_core);
    updated.set(Component::Core, new_core.clone());

    if !reresolve {
        return CoreChange {
            selection: updated,
            outcome: ProxyOutcome::Unchanged,
        };
    }

    let outcome = match find_compatible_proxy(new_core, catalog) {
        Some(proxy) => {
            updated.set(Component::Proxy, proxy.clone());
            ProxyOutcome::Resolved {
                proxy: proxy.clone(),
            }
        }
        None => {
            tracing::debug!(
                core = %new_core.version,
                edition = %new_core.edition,
                "no compatible proxy, keeping previous selection"
            );
            ProxyOutcome::NoCompatibleCandidate
        }
    };

    CoreChange {
        selection: updated,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwiz_types::{ArtifactOrigin, Edition};

    fn artifact(version: &str, edition: Edition, checksum: &str) -> ReleaseArtifact {
        ReleaseArtifact {
            version: version.to_string(),
            release: Some("1".to_string()),
            checksum: checksum.to_string(),
            edition,
            estimated_size_bytes: 0,
            origin: ArtifactOrigin::RemoteMirror,
        }
    }

    fn catalog(proxies: Vec<ReleaseArtifact>) -> ComponentCatalog {
        let mut catalog = ComponentCatalog::new();
        catalog.insert(Component::Proxy, proxies);
        catalog
    }

    #[test]
    fn test_positional_match() {
        let core = artifact("4.1.0", Edition::Community, "c");
        assert!(is_proxy_compatible(&core, &artifact("4.1.5", Edition::Community, "p")));
        assert!(!is_proxy_compatible(&core, &artifact("4.2.0", Edition::Community, "p")));
        assert!(!is_proxy_compatible(&core, &artifact("4.1.0", Edition::Commercial, "p")));
        // Middle characters are not compared
        assert!(is_proxy_compatible(
            &artifact("4.1.0.0", Edition::Community, "c"),
            &artifact("4-1x", Edition::Community, "p")
        ));
    }

    #[test]
    fn test_short_versions_match_only_short() {
        let core = artifact("4", Edition::Community, "c");
        assert!(is_proxy_compatible(&core, &artifact("4", Edition::Community, "p")));
        assert!(is_proxy_compatible(&core, &artifact("4.", Edition::Community, "p")));
        assert!(!is_proxy_compatible(&core, &artifact("4.1", Edition::Community, "p")));
    }

    #[test]
    fn test_first_candidate_wins() {
        let catalog = catalog(vec![
            artifact("4.2.0", Edition::Community, "p0"),
            artifact("4.1.2", Edition::Community, "p1"),
            artifact("4.1.9", Edition::Community, "p2"),
        ]);
        let core = artifact("4.1.0", Edition::Community, "c");

        let change = on_core_version_changed(&core, &catalog, &Selection::new());
        assert_eq!(change.selection.get(Component::Proxy).unwrap().checksum, "p1");
        assert_eq!(change.selection.get(Component::Core), Some(&core));
        assert!(matches!(change.outcome, ProxyOutcome::Resolved { .. }));
    }

    #[test]
    fn test_no_candidate_keeps_stale_proxy() {
        let catalog = catalog(vec![artifact("4.2.0", Edition::Community, "p0")]);
        let mut selection = Selection::new();
        selection.set(Component::Core, artifact("4.2.1", Edition::Community, "old-core"));
        selection.set(Component::Proxy, artifact("4.2.0", Edition::Community, "p0"));

        let core = artifact("4.1.0", Edition::Community, "c");
        let change = on_core_version_changed(&core, &catalog, &selection);

        assert_eq!(change.outcome, ProxyOutcome::NoCompatibleCandidate);
        assert_eq!(change.selection.get(Component::Proxy).unwrap().checksum, "p0");
        assert_eq!(change.selection.get(Component::Core).unwrap().checksum, "c");
    }

    #[test]
    fn test_same_signature_skips_reresolution() {
        let catalog = catalog(vec![artifact("4.1.3", Edition::Community, "p-new")]);
        let mut selection = Selection::new();
        selection.set(Component::Core, artifact("4.1.0", Edition::Community, "c0"));
        selection.set(Component::Proxy, artifact("4.1.1", Edition::Community, "p-user"));

        // Patch bump on the core: positions 0 and 2 unchanged, proxy untouched
        let core = artifact("4.1.7", Edition::Community, "c1");
        let change = on_core_version_changed(&core, &catalog, &selection);

        assert_eq!(change.outcome, ProxyOutcome::Unchanged);
        assert_eq!(change.selection.get(Component::Proxy).unwrap().checksum, "p-user");
        assert_eq!(change.selection.get(Component::Core).unwrap().checksum, "c1");
    }

    #[test]
    fn test_edition_change_reresolves() {
        let catalog = catalog(vec![
            artifact("4.1.0", Edition::Community, "p-ce"),
            artifact("4.1.0", Edition::Commercial, "p-biz"),
        ]);
        let mut selection = Selection::new();
        selection.set(Component::Core, artifact("4.1.0", Edition::Community, "c-ce"));
        selection.set(Component::Proxy, artifact("4.1.0", Edition::Community, "p-ce"));

        let core = artifact("4.1.0", Edition::Commercial, "c-biz");
        let change = on_core_version_changed(&core, &catalog, &selection);
        assert_eq!(change.selection.get(Component::Proxy).unwrap().checksum, "p-biz");
    }

    #[test]
    fn test_needs_reresolution() {
        let core = artifact("4.1.0", Edition::Community, "c");
        assert!(needs_reresolution(None, &core));
        assert!(!needs_reresolution(Some(&artifact("4.1.9", Edition::Community, "x")), &core));
        assert!(needs_reresolution(Some(&artifact("4.2.0", Edition::Community, "x")), &core));
        assert!(needs_reresolution(Some(&artifact("3.1.0", Edition::Community, "x")), &core));
    }
}
