#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Component catalog normalization for dwiz
//!
//! Turns the deployment service's raw component listing into a
//! `ComponentCatalog`: unknown components are dropped, edition-split
//! listings are merged under one role, duplicates and versions below the
//! configured floor are removed. Server order is kept everywhere else.

use dwiz_config::CatalogConfig;
use dwiz_errors::Error;
use dwiz_types::api::{RawArtifact, RawComponent};
use dwiz_types::{
    compare_versions, ArtifactOrigin, Component, ComponentCatalog, Edition, ReleaseArtifact,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Normalization knobs, validated against the component set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Backend component name → role
    pub aliases: BTreeMap<String, Component>,
    /// Role → lowest version kept
    pub min_versions: BTreeMap<Component, String>,
}

impl CatalogOptions {
    /// Build options from the `[catalog]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if an alias target or a floor key is not a component.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, Error> {
        let aliases = config
            .aliases
            .iter()
            .map(|(name, role)| Ok((name.clone(), role.parse::<Component>()?)))
            .collect::<Result<_, Error>>()?;
        let min_versions = config
            .min_versions
            .iter()
            .map(|(role, floor)| Ok((role.parse::<Component>()?, floor.clone())))
            .collect::<Result<_, Error>>()?;

        Ok(Self {
            aliases,
            min_versions,
        })
    }

    /// Role a backend component name maps to, if any
    #[must_use]
    pub fn role_of(&self, name: &str) -> Option<Component> {
        self.aliases
            .get(name)
            .copied()
            .or_else(|| name.parse().ok())
    }
}

/// Normalize a raw component listing into a catalog
///
/// # Errors
///
/// Returns an error if an artifact carries an unknown edition or origin.
pub fn normalize(
    raw: &[RawComponent],
    options: &CatalogOptions,
) -> Result<ComponentCatalog, Error> {
    let mut grouped: BTreeMap<Component, (usize, Vec<ReleaseArtifact>)> = BTreeMap::new();

    for entry in raw {
        let Some(role) = options.role_of(&entry.name) else {
            tracing::debug!(component = %entry.name, "ignoring unknown component");
            continue;
        };

        let artifacts = entry
            .info
            .iter()
            .map(convert_artifact)
            .collect::<Result<Vec<_>, Error>>()?;

        let slot = grouped.entry(role).or_default();
        slot.0 += 1;
        slot.1.extend(artifacts);
    }

    let mut catalog = ComponentCatalog::new();
    for (role, (sources, mut artifacts)) in grouped {
        if sources > 1 {
            // Stable, so equal versions keep arrival order
            artifacts.sort_by(|a, b| compare_versions(&b.version, &a.version));
        }
        dedup_by_key(&mut artifacts);
        if let Some(floor) = options.min_versions.get(&role) {
            let before = artifacts.len();
            artifacts.retain(|a| compare_versions(&a.version, floor) != Ordering::Less);
            if artifacts.len() < before {
                tracing::debug!(
                    component = %role,
                    floor = %floor,
                    dropped = before - artifacts.len(),
                    "filtered artifacts below minimum version"
                );
            }
        }
        catalog.insert(role, artifacts);
    }

    Ok(catalog)
}

/// Backend names in `raw` that map to no component
#[must_use]
pub fn unknown_components(raw: &[RawComponent], options: &CatalogOptions) -> Vec<String> {
    raw.iter()
        .filter(|entry| options.role_of(&entry.name).is_none())
        .map(|entry| entry.name.clone())
        .collect()
}

fn convert_artifact(raw: &RawArtifact) -> Result<ReleaseArtifact, Error> {
    Ok(ReleaseArtifact {
        version: raw.version.clone(),
        release: raw.release.clone().filter(|r| !r.is_empty()),
        checksum: raw.md5.clone(),
        edition: Edition::from_wire(raw.version_type.as_deref())?,
        estimated_size_bytes: raw.estimated_size.unwrap_or_default(),
        origin: ArtifactOrigin::from_wire(raw.origin.as_deref())?,
    })
}

fn dedup_by_key(artifacts: &mut Vec<ReleaseArtifact>) {
    let mut seen = HashSet::new();
    artifacts.retain(|a| {
        seen.insert((
            a.version.clone(),
            a.release.clone().unwrap_or_default(),
            a.checksum.clone(),
        ))
    });
}
