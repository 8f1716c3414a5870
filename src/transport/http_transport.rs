// src/transport/http_transport.rs

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use crate::config::ClientConfig;
use crate::error::{RandomOrgError, Result};
use crate::transport::Transport;

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpTransport {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL and appends the percent-encoded query.
    pub fn url_for(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let pairs = query.iter().map(|(key, value)| (*key, value.as_str()));
        Url::parse_with_params(&base, pairs).map_err(|e| {
            warn!("Cannot build request URL from {}: {}", base, e);
            RandomOrgError::InvalidUrl {
                url: base.clone(),
                reason: e.to_string(),
            }
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = self.url_for(path, query)?;
        debug!("GET {}", url.as_str());

        let response = self.client.get(url.clone()).send().map_err(|e| {
            warn!("Request to {} failed: {}", url.as_str(), e);
            RandomOrgError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            warn!("Failed to read response body from {}: {}", url.as_str(), e);
            RandomOrgError::Http(e)
        })?;

        if !status.is_success() {
            warn!("{} answered {}: {}", url.as_str(), status, body.trim());
            return Err(RandomOrgError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        debug!("{} answered {} ({} bytes)", url.as_str(), status, body.len());
        Ok(body)
    }
}
