//! Deployment service REST API

use crate::client::NetClient;
use async_trait::async_trait;
use dwiz_errors::{Error, NetworkError};
use dwiz_types::api::{
    ApiResponse, ConnectionInfo, DataList, DeploymentInfo, MirrorReport, RawComponent,
};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Calls the wizard makes against the deployment service
#[async_trait]
pub trait DeployApi: Send + Sync {
    /// Installable artifacts of every component
    async fn fetch_component_catalog(&self) -> Result<Vec<RawComponent>, Error>;

    /// Availability of the configured artifact mirrors
    async fn fetch_mirror_status(&self) -> Result<MirrorReport, Error>;

    /// Deployments whose task is in `status`
    async fn fetch_deployments_by_status(&self, status: &str) -> Result<Vec<DeploymentInfo>, Error>;

    /// Remove a deployment record
    async fn delete_deployment(&self, name: &str) -> Result<(), Error>;

    /// Connection parameters of an existing cluster
    async fn fetch_connection_info(&self, cluster: &str) -> Result<ConnectionInfo, Error>;
}

/// `DeployApi` over HTTP
#[derive(Clone, Debug)]
pub struct ApiClient {
    net: NetClient,
    base: Url,
}

impl ApiClient {
    /// Create a client for the service at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(net: NetClient, base_url: &str) -> Result<Self, Error> {
        let mut base = Url::parse(base_url)
            .map_err(|e| NetworkError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(base_url.to_string()).into());
        }
        // Keep any path prefix when joining endpoints
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { net, base })
    }

    /// Base URL endpoints are resolved against
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| NetworkError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>, Error> {
        tracing::debug!(%url, "GET");
        let response = self.net.get(url.as_str()).await?;
        decode(url, response).await
    }
}

/// Map an HTTP response onto the service envelope
async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<Option<T>, Error> {
    let status = response.status();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return Err(NetworkError::ServiceBusy {
            url: url.to_string(),
        }
        .into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| NetworkError::RequestFailed(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .map(|envelope| envelope.msg)
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| status.to_string());
        return Err(NetworkError::HttpError {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(&body).map_err(|e| NetworkError::InvalidResponse {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    if !envelope.success {
        return Err(NetworkError::ApiError {
            code: envelope.code,
            message: envelope.msg,
        }
        .into());
    }
    Ok(envelope.data)
}

fn require<T>(url: &Url, data: Option<T>) -> Result<T, Error> {
    data.ok_or_else(|| {
        NetworkError::InvalidResponse {
            url: url.to_string(),
            message: "response has no data".to_string(),
        }
        .into()
    })
}

#[async_trait]
impl DeployApi for ApiClient {
    async fn fetch_component_catalog(&self) -> Result<Vec<RawComponent>, Error> {
        let url = self.endpoint(&["api", "v1", "components"])?;
        let data: Option<DataList<RawComponent>> = self.get_json(&url).await?;
        Ok(data.unwrap_or_default().items)
    }

    async fn fetch_mirror_status(&self) -> Result<MirrorReport, Error> {
        let url = self.endpoint(&["api", "v1", "mirrors"])?;
        let data: Option<MirrorReport> = self.get_json(&url).await?;
        Ok(data.unwrap_or_default())
    }

    async fn fetch_deployments_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<DeploymentInfo>, Error> {
        let mut url = self.endpoint(&["api", "v1", "deployments"])?;
        url.query_pairs_mut().append_pair("task_status", status);
        let data: Option<DataList<DeploymentInfo>> = self.get_json(&url).await?;
        Ok(data.unwrap_or_default().items)
    }

    async fn delete_deployment(&self, name: &str) -> Result<(), Error> {
        let url = self.endpoint(&["api", "v1", "deployments", name])?;
        tracing::debug!(%url, "DELETE");
        let response = self.net.delete(url.as_str()).await?;
        decode::<serde_json::Value>(&url, response).await?;
        Ok(())
    }

    async fn fetch_connection_info(&self, cluster: &str) -> Result<ConnectionInfo, Error> {
        let url = self.endpoint(&["api", "v1", "connections", cluster])?;
        let data = self.get_json(&url).await?;
        require(&url, data)
    }
}
