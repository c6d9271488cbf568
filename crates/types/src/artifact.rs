//! Release artifacts and their identifying keys

use dwiz_errors::{CatalogError, SelectionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Licensing/support track of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edition {
    #[serde(rename = "community", alias = "ce")]
    Community,
    #[serde(rename = "commercial", alias = "business")]
    Commercial,
}

impl Edition {
    /// Map the backend's `version_type` field; a missing type is commercial.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is present but not a known edition.
    pub fn from_wire(value: Option<&str>) -> Result<Self, CatalogError> {
        value.map_or(Ok(Self::Commercial), str::parse)
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Community => write!(f, "community"),
            Self::Commercial => write!(f, "commercial"),
        }
    }
}

impl FromStr for Edition {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ce" | "community" => Ok(Self::Community),
            "business" | "commercial" => Ok(Self::Commercial),
            _ => Err(CatalogError::InvalidEdition {
                value: s.to_string(),
            }),
        }
    }
}

/// Where an artifact is served from (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactOrigin {
    #[serde(alias = "remote")]
    RemoteMirror,
    #[serde(alias = "local")]
    LocalImage,
}

impl ArtifactOrigin {
    /// Map the backend's `type` field; a missing type means a remote mirror.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is present but unknown.
    pub fn from_wire(value: Option<&str>) -> Result<Self, CatalogError> {
        match value {
            None | Some("remote" | "remote-mirror") => Ok(Self::RemoteMirror),
            Some("local" | "local-image") => Ok(Self::LocalImage),
            Some(other) => Err(CatalogError::InvalidOrigin {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ArtifactOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteMirror => write!(f, "remote"),
            Self::LocalImage => write!(f, "local"),
        }
    }
}

/// One installable build of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseArtifact {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    pub checksum: String,
    pub edition: Edition,
    #[serde(default)]
    pub estimated_size_bytes: u64,
    pub origin: ArtifactOrigin,
}

impl ReleaseArtifact {
    /// Unique key of this artifact within its component
    #[must_use]
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            version: self.version.clone(),
            release: self.release.clone(),
            checksum: self.checksum.clone(),
        }
    }

    /// Whether this artifact is the one named by `key`
    ///
    /// Compares the text forms. A key parsed from text splits on the last two
    /// `-`, which lands elsewhere when the release or checksum holds one.
    #[must_use]
    pub fn matches_key(&self, key: &ArtifactKey) -> bool {
        self.key().to_string() == key.to_string()
    }

    /// Character of the raw version string at `position`
    #[must_use]
    pub fn version_char(&self, position: usize) -> Option<char> {
        self.version.chars().nth(position)
    }

    /// Leading integer of the release qualifier (`"3.el7"` -> 3)
    ///
    /// `None` when the release is missing or does not start with a number.
    #[must_use]
    pub fn leading_release(&self) -> Option<u64> {
        self.release
            .as_deref()?
            .split('.')
            .next()?
            .trim()
            .parse()
            .ok()
    }

    /// First character of the version as a digit
    #[must_use]
    pub fn major_digit(&self) -> Option<u32> {
        self.version_char(0)?.to_digit(10)
    }

    /// Version with release suffix, as shown in the version table
    #[must_use]
    pub fn display_version(&self) -> String {
        match self.release.as_deref() {
            Some(release) if !release.is_empty() => format!("{}-{release}", self.version),
            _ => self.version.clone(),
        }
    }
}

/// `(version, release, checksum)` triple identifying an artifact
///
/// The textual form is `VERSION-RELEASE-CHECKSUM`. Parsing splits from the
/// right, so the fields of a parsed key are only a guess when any of them
/// contains `-`; [`ReleaseArtifact::matches_key`] resolves it against the
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactKey {
    pub version: String,
    pub release: Option<String>,
    pub checksum: String,
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.version,
            self.release.as_deref().unwrap_or_default(),
            self.checksum
        )
    }
}

impl FromStr for ArtifactKey {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectionError::InvalidKey { key: s.to_string() };

        let mut parts = s.rsplitn(3, '-');
        let checksum = parts.next().filter(|c| !c.is_empty()).ok_or_else(invalid)?;
        let release = parts.next().ok_or_else(invalid)?;
        let version = parts.next().filter(|v| !v.is_empty()).ok_or_else(invalid)?;

        Ok(Self {
            version: version.to_string(),
            release: (!release.is_empty()).then(|| release.to_string()),
            checksum: checksum.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(version: &str, release: Option<&str>) -> ReleaseArtifact {
        ReleaseArtifact {
            version: version.to_string(),
            release: release.map(str::to_string),
            checksum: "9f1c".to_string(),
            edition: Edition::Community,
            estimated_size_bytes: 0,
            origin: ArtifactOrigin::RemoteMirror,
        }
    }

    #[test]
    fn test_key_display_and_parse() {
        let a = artifact("4.2.1.0", Some("100000102023092807.el7"));
        let text = a.key().to_string();
        assert_eq!(text, "4.2.1.0-100000102023092807.el7-9f1c");

        let parsed: ArtifactKey = text.parse().unwrap();
        assert!(a.matches_key(&parsed));
    }

    #[test]
    fn test_key_without_release() {
        let a = artifact("4.1.0", None);
        let parsed: ArtifactKey = a.key().to_string().parse().unwrap();
        assert_eq!(parsed.release, None);
        assert!(a.matches_key(&parsed));
    }

    #[test]
    fn test_key_keeps_dashed_version() {
        let parsed: ArtifactKey = "4.1.0-beta-2-abc".parse().unwrap();
        assert_eq!(parsed.version, "4.1.0-beta");
        assert_eq!(parsed.release.as_deref(), Some("2"));
        assert_eq!(parsed.checksum, "abc");
    }

    #[test]
    fn test_key_with_dashed_checksum_and_release() {
        let mut a = artifact("4.1.0", Some("1-el7"));
        a.checksum = "md5-4.1.0".to_string();
        let parsed: ArtifactKey = a.key().to_string().parse().unwrap();
        assert_ne!(parsed.checksum, a.checksum);
        assert!(a.matches_key(&parsed));
        assert!(!artifact("4.1.0", Some("1-el7")).matches_key(&parsed));
    }

    #[test]
    fn test_key_rejects_malformed() {
        assert!("4.1.0".parse::<ArtifactKey>().is_err());
        assert!("4.1.0-1-".parse::<ArtifactKey>().is_err());
        assert!("-1-abc".parse::<ArtifactKey>().is_err());
    }

    #[test]
    fn test_leading_release() {
        assert_eq!(artifact("4.2.1", Some("20231019.el7")).leading_release(), Some(20_231_019));
        assert_eq!(artifact("4.2.1", Some("7")).leading_release(), Some(7));
        assert_eq!(artifact("4.2.1", Some("el7")).leading_release(), None);
        assert_eq!(artifact("4.2.1", None).leading_release(), None);
    }

    #[test]
    fn test_edition_wire_values() {
        assert_eq!(Edition::from_wire(Some("ce")).unwrap(), Edition::Community);
        assert_eq!(Edition::from_wire(Some("business")).unwrap(), Edition::Commercial);
        assert_eq!(Edition::from_wire(None).unwrap(), Edition::Commercial);
        assert!(Edition::from_wire(Some("enterprise")).is_err());

        let json = serde_json::to_string(&Edition::Community).unwrap();
        assert_eq!(json, r#""community""#);
        let parsed: Edition = serde_json::from_str(r#""ce""#).unwrap();
        assert_eq!(parsed, Edition::Community);
    }

    #[test]
    fn test_origin_wire_values() {
        assert_eq!(
            ArtifactOrigin::from_wire(Some("local")).unwrap(),
            ArtifactOrigin::LocalImage
        );
        assert_eq!(
            ArtifactOrigin::from_wire(None).unwrap(),
            ArtifactOrigin::RemoteMirror
        );
        assert!(ArtifactOrigin::from_wire(Some("ftp")).is_err());
    }
}
