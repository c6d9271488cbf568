//! Configuration sections shared across crates

use dwiz_types::{ColorChoice, OutputFormat, StableLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color_choice(),
        }
    }
}

/// Deployment service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64, // seconds
    /// Fixed delay between attempts while the service answers busy
    #[serde(default = "default_busy_retry_delay_ms")]
    pub busy_retry_delay_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            retries: default_retries(),
            retry_delay: default_retry_delay(),
            busy_retry_delay_ms: default_busy_retry_delay_ms(),
        }
    }
}

/// Recommendation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Release train the core recommendation prefers, e.g. `4.2.1`
    #[serde(default)]
    pub preferred_core_line: Option<StableLine>,
    /// Core major version below which optional components are unavailable
    #[serde(default = "default_low_version_major")]
    pub low_version_major: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            preferred_core_line: None,
            low_version_major: default_low_version_major(),
        }
    }
}

/// Artifact mirrors the diagnostics know about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    #[serde(default = "default_known_mirrors")]
    pub known: Vec<String>,
    #[serde(default = "default_expected_count")]
    pub expected_count: usize,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            known: default_known_mirrors(),
            expected_count: default_expected_count(),
        }
    }
}

/// Catalog normalization knobs
///
/// Keys and values stay strings here; `dwiz-catalog` validates them against
/// the component set when it builds its options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Backend component name → component key
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Component key → lowest version kept
    #[serde(default)]
    pub min_versions: BTreeMap<String, String>,
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_api_url() -> String {
    "http://127.0.0.1:8680".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

fn default_busy_retry_delay_ms() -> u64 {
    1000
}

fn default_low_version_major() -> u32 {
    4
}

fn default_known_mirrors() -> Vec<String> {
    vec!["community.stable".to_string(), "development-kit".to_string()]
}

fn default_expected_count() -> usize {
    2
}
