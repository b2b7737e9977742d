//! HTTP implementation of [`StatusSource`].

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{FetchError, PollerError};
use crate::metrics;

use super::source::StatusSource;
use super::types::{AppInfo, HealthStatus, HEALTH_ENDPOINT, INFO_ENDPOINT};

/// Status client talking to a live web application.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Full URL of the info endpoint.
    info_url: Url,
    /// Full URL of the health endpoint.
    health_url: Url,
}

impl HttpStatusSource {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, PollerError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.http_connect_timeout())
            // Health checks reuse one connection every interval
            .tcp_keepalive(Duration::from_secs(60))
            .pool_max_idle_per_host(2)
            .build()?;

        Self::with_client(http, &config.status_base_url)
    }

    /// Create a source from an existing HTTP client and base URL.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, PollerError> {
        let base = base_url.trim_end_matches('/');

        Ok(Self {
            http,
            info_url: Url::parse(&format!("{}{}", base, INFO_ENDPOINT))?,
            health_url: Url::parse(&format!("{}{}", base, HEALTH_ENDPOINT))?,
        })
    }

    /// Full URL of the info endpoint.
    pub fn info_url(&self) -> &Url {
        &self.info_url
    }

    /// Full URL of the health endpoint.
    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    /// Issue one GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        endpoint: &'static str,
    ) -> Result<T, FetchError> {
        let start = Instant::now();
        let result = self.request(url, endpoint).await;
        metrics::record_request(endpoint, start, result.as_ref().err());
        result
    }

    async fn request<T: DeserializeOwned>(
        &self,
        url: &Url,
        endpoint: &'static str,
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        decode_object(&body).map_err(|reason| FetchError::Decode { endpoint, reason })
    }
}

/// Decode a body that must be a JSON object; field contents are not checked.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

impl StatusSource for HttpStatusSource {
    #[instrument(skip(self), fields(url = %self.info_url))]
    async fn fetch_app_info(&self) -> Result<AppInfo, FetchError> {
        let info: AppInfo = self.get_json(&self.info_url, INFO_ENDPOINT).await?;
        debug!(environment = %info.environment, host = %info.host, "Fetched app info");
        Ok(info)
    }

    #[instrument(skip(self), fields(url = %self.health_url))]
    async fn fetch_health(&self) -> Result<HealthStatus, FetchError> {
        let health: HealthStatus = self.get_json(&self.health_url, HEALTH_ENDPOINT).await?;
        debug!(status = %health.status, "Fetched health status");
        Ok(health)
    }
}
