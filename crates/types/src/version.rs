//! Version string helpers
//!
//! Artifact versions are four- or five-part dotted strings that are not valid
//! semver, so they are compared segment by segment instead of being parsed.

use dwiz_errors::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Compare two dotted version strings segment by segment
///
/// Numeric segments compare numerically, anything else lexically. A version
/// that is a prefix of another sorts first (`4.2` < `4.2.0`).
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Officially recommended `major.minor.patch` release train
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StableLine {
    segments: [String; 3],
}

impl StableLine {
    /// Whether the first three dot-segments of `version` equal this line
    #[must_use]
    pub fn matches(&self, version: &str) -> bool {
        let mut parts = version.split('.');
        self.segments
            .iter()
            .all(|segment| parts.next() == Some(segment.as_str()))
    }
}

impl FromStr for StableLine {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidStableLine {
            value: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(invalid());
        };
        if [major, minor, patch].iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        Ok(Self {
            segments: [major.to_string(), minor.to_string(), patch.to_string()],
        })
    }
}

impl TryFrom<String> for StableLine {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StableLine> for String {
    fn from(line: StableLine) -> Self {
        line.to_string()
    }
}

impl fmt::Display for StableLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
