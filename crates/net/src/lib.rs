#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for dwiz
//!
//! This crate owns the HTTP side of the wizard: a pooled reqwest client with
//! transport retries, the `DeployApi` collaborator trait with its HTTP
//! implementation, and the cancellable busy-retry loop.

mod api;
mod client;
mod retry;

pub use api::{ApiClient, DeployApi};
pub use client::{NetClient, NetConfig};
pub use retry::{retry_while_busy, retry_while_busy_with};

use dwiz_config::NetworkConfig;
use dwiz_errors::Error;

/// Build an API client from the `[network]` configuration section
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or `api_url` is invalid.
pub fn api_client(config: &NetworkConfig) -> Result<ApiClient, Error> {
    let net = NetClient::new(NetConfig::from(config))?;
    ApiClient::new(net, &config.api_url)
}
