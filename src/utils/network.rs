use crate::error::{GhwError, Result};
use reqwest::Client;
use std::time::Duration;

/// Configuration for HTTP client with proper timeouts
pub struct NetworkConfig {
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            user_agent: format!("ghw/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create an HTTP client whose timeout bounds the whole request
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| GhwError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Map a transport failure to the matching error variant
pub fn classify_network_error(error: &reqwest::Error, url: &str) -> GhwError {
    let host = host_of(url);

    if error.is_timeout() {
        return GhwError::timeout(format!("request to {} timed out", host));
    }

    if error.is_connect() {
        if is_dns_resolution_error(error) {
            return GhwError::network(format!("unable to resolve host {}", host));
        }

        return GhwError::network(format!("failed to connect to {}: {}", host, error));
    }

    GhwError::network(format!("request to {} failed: {}", host, error))
}

fn is_dns_resolution_error(error: &reqwest::Error) -> bool {
    let error_msg = format!("{:?}", error).to_lowercase();
    let dns_indicators = [
        "dns",
        "name resolution",
        "failed to lookup address",
        "name or service not known",
        "nodename nor servname provided",
        "no such host",
    ];

    dns_indicators
        .iter()
        .any(|&indicator| error_msg.contains(indicator))
}

fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown-host".to_string())
}
