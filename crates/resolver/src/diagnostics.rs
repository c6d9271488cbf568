//! Mirror availability classification
//!
//! When a required component has no artifact, the likely cause is a mirror
//! that was never configured or has been disabled. This module turns a mirror
//! status report into that explanation; fetching the report lives in
//! `dwiz-ops`.

use dwiz_config::MirrorConfig;
use dwiz_types::api::MirrorReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a mirror cannot serve artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingReason {
    NotConfigured,
    Disabled,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "not-configured"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// One actionable mirror finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorDiagnostic {
    pub mirror_name: String,
    pub reason: MissingReason,
}

impl MirrorDiagnostic {
    #[must_use]
    pub fn new(mirror_name: impl Into<String>, reason: MissingReason) -> Self {
        Self {
            mirror_name: mirror_name.into(),
            reason,
        }
    }
}

/// Mirrors the wizard expects to be configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPolicy {
    pub known: Vec<String>,
    pub expected_count: usize,
}

impl Default for MirrorPolicy {
    fn default() -> Self {
        Self::from(&MirrorConfig::default())
    }
}

impl From<&MirrorConfig> for MirrorPolicy {
    fn from(config: &MirrorConfig) -> Self {
        Self {
            known: config.known.clone(),
            expected_count: config.expected_count,
        }
    }
}

/// Classify a mirror status report
///
/// Known mirrors missing from the report are `NotConfigured` when fewer
/// mirrors than expected are known; listed mirrors that are unavailable are
/// `Disabled`. Known-list findings come first, then report order.
#[must_use]
pub fn classify_mirrors(report: &MirrorReport, policy: &MirrorPolicy) -> Vec<MirrorDiagnostic> {
    let mut diagnostics = Vec::new();

    if report.total < policy.expected_count {
        diagnostics.extend(
            policy
                .known
                .iter()
                .filter(|name| !report.items.iter().any(|item| &item.section_name == *name))
                .map(|name| MirrorDiagnostic::new(name.clone(), MissingReason::NotConfigured)),
        );
    }

    if report.total > 0 {
        diagnostics.extend(
            report
                .items
                .iter()
                .filter(|item| !item.available)
                .map(|item| {
                    MirrorDiagnostic::new(item.section_name.clone(), MissingReason::Disabled)
                }),
        );
    }

    diagnostics
}
