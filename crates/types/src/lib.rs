#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the dwiz deployment wizard
//!
//! This crate provides the data model shared by every other crate: the
//! closed set of deployable components, editions, release artifacts, the
//! normalized catalog, the wizard's selection and the backend wire types.

pub mod api;
pub mod artifact;
pub mod catalog;
pub mod version;

// Re-export commonly used types
pub use artifact::{ArtifactKey, ArtifactOrigin, Edition, ReleaseArtifact};
pub use catalog::{ComponentCatalog, Selection};
pub use version::{compare_versions, StableLine};

use dwiz_errors::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployable component role
///
/// Variant order is the display order of the wizard's version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// Core database engine
    Core,
    /// Proxy layer in front of the engine
    Proxy,
    /// Management server
    Manager,
    /// Monitoring agent
    Agent,
    /// Lightweight management console
    Console,
}

impl Component {
    /// Every component, in display order
    pub const ALL: [Component; 5] = [
        Self::Core,
        Self::Proxy,
        Self::Manager,
        Self::Agent,
        Self::Console,
    ];

    /// Stable lowercase key used on the wire and in configuration
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Proxy => "proxy",
            Self::Manager => "manager",
            Self::Agent => "agent",
            Self::Console => "console",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Component {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|component| component.key() == s)
            .ok_or_else(|| CatalogError::UnknownComponent {
                name: s.to_string(),
            })
    }
}

/// Wizard flow, which decides the components that must be installable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flow {
    /// Fresh deployment of engine, proxy and management server
    FreshInstall,
    /// Upgrade of an existing management server only
    UpgradeOnly,
}

impl Flow {
    /// Components that must have an installable artifact before proceeding
    #[must_use]
    pub fn required_components(self) -> &'static [Component] {
        match self {
            Self::FreshInstall => &[Component::Core, Component::Proxy, Component::Manager],
            Self::UpgradeOnly => &[Component::Manager],
        }
    }
}

impl Default for Flow {
    fn default() -> Self {
        Self::FreshInstall
    }
}

impl clap::ValueEnum for Flow {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::FreshInstall, Self::UpgradeOnly]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::FreshInstall => clap::builder::PossibleValue::new("install"),
            Self::UpgradeOnly => clap::builder::PossibleValue::new("upgrade"),
        })
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Tty,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Tty
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
