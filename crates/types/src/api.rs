//! Wire types of the deployment service's REST API
//!
//! Every endpoint wraps its payload in the same envelope; list endpoints put
//! a `{total, items}` object in `data`.

use serde::{Deserialize, Serialize};

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// Paged list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DataList<T> {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub items: Vec<T>,
}

impl<T> Default for DataList<T> {
    fn default() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }
}

/// Component with its artifacts, as listed by `GET /api/v1/components`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComponent {
    pub name: String,
    #[serde(default)]
    pub info: Vec<RawArtifact>,
}

/// One artifact entry of a raw component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArtifact {
    pub version: String,
    #[serde(default)]
    pub release: Option<String>,
    pub md5: String,
    /// `ce` or `business`
    #[serde(default)]
    pub version_type: Option<String>,
    /// `remote` or `local`
    #[serde(default, rename = "type")]
    pub origin: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub estimated_size: Option<u64>,
}

/// Remote mirror status, as listed by `GET /api/v1/mirrors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorInfo {
    pub section_name: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub mirror_path: Option<String>,
}

/// Mirror status report: known mirror count plus the listed mirrors
pub type MirrorReport = DataList<MirrorInfo>;

/// Deployment summary, as listed by `GET /api/v1/deployments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// Connection parameters of an existing cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub cluster_name: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
}
