//! Cloudflare zone settings client

mod api;
mod error;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::config::{ConfigError, ProviderConfig};

pub(crate) use types::{CloudflareCacheReserve, CloudflareResponse, UpdateSettingBody};

/// Cloudflare v4 API client for zone settings
pub struct CloudflareClient {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) base_url: String,
}

impl CloudflareClient {
    /// Builds a client with the default endpoint and timeouts.
    pub fn new(api_token: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_config(&ProviderConfig::with_token(api_token))
    }

    /// 创建带超时配置的客户端
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_token: config.api_token.clone(),
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
