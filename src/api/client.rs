//! Authenticated access to the search API
//!
//! `ApiFetcher` is the seam between command logic and the network:
//! the paginator and stats runner only ever see raw response bodies.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::{ApiKey, Config};
use crate::error::{GhwError, Result};
use crate::utils::network::{classify_network_error, create_http_client, NetworkConfig};

/// Performs a single authenticated GET
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiFetcher: Send + Sync {
    /// Fetch `url` and return the body of a 200 response
    async fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

/// `ApiFetcher` backed by reqwest with bearer-token auth
pub struct HttpFetcher {
    http_client: Client,
    api_key: ApiKey,
}

impl HttpFetcher {
    pub fn new(api_key: ApiKey, network: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            http_client: create_http_client(network)?,
            api_key,
        })
    }

    /// Build a fetcher from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GhwError::config("missing api key"))?;

        let network = NetworkConfig {
            request_timeout: config.request_timeout(),
            ..NetworkConfig::default()
        };

        Self::new(api_key, &network)
    }
}

#[async_trait]
impl ApiFetcher for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .send()
            .await
            .map_err(|e| classify_network_error(&e, url.as_str()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GhwError::http_status(status.as_u16(), url.as_str()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_network_error(&e, url.as_str()))?;

        debug!("received {} bytes from {}", body.len(), url.path());
        Ok(body.to_vec())
    }
}
