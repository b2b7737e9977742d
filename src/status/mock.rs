//! Mock status source for unit testing.
//!
//! This module provides a source that can be used in tests
//! without making real network requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::FetchError;

use super::source::StatusSource;
use super::types::{AppInfo, HealthStatus, HEALTH_ENDPOINT, INFO_ENDPOINT};

/// Configuration for mock source behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail info requests.
    pub fail_info: bool,
    /// Whether to fail health requests.
    pub fail_health: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock status source for testing.
///
/// Clones share responses and counters.
#[derive(Debug, Clone)]
pub struct MockStatusSource {
    /// Mock configuration.
    config: Arc<Mutex<MockConfig>>,
    /// Info response.
    info: Arc<Mutex<AppInfo>>,
    /// Health response.
    health: Arc<Mutex<HealthStatus>>,
    /// Number of info requests started.
    info_calls: Arc<AtomicU64>,
    /// Number of health requests started.
    health_calls: Arc<AtomicU64>,
}

impl MockStatusSource {
    /// Create a new mock source with default configuration.
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock source with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config: Arc::new(Mutex::new(config)),
            info: Arc::new(Mutex::new(AppInfo {
                environment: "development".to_string(),
                host: "localhost".to_string(),
                deployment: "mock".to_string(),
            })),
            health: Arc::new(Mutex::new(HealthStatus {
                status: "healthy".to_string(),
            })),
            info_calls: Arc::new(AtomicU64::new(0)),
            health_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Set the info response.
    pub fn set_info(&self, info: AppInfo) {
        *self.info.lock().unwrap() = info;
    }

    /// Set the health status string.
    pub fn set_health(&self, status: &str) {
        self.health.lock().unwrap().status = status.to_string();
    }

    /// Make info requests fail or succeed.
    pub fn set_fail_info(&self, fail: bool) {
        self.config.lock().unwrap().fail_info = fail;
    }

    /// Make health requests fail or succeed.
    pub fn set_fail_health(&self, fail: bool) {
        self.config.lock().unwrap().fail_health = fail;
    }

    /// Set simulated latency.
    pub fn set_latency(&self, latency_ms: u64) {
        self.config.lock().unwrap().latency_ms = latency_ms;
    }

    /// Number of info requests started so far.
    pub fn info_calls(&self) -> u64 {
        self.info_calls.load(Ordering::SeqCst)
    }

    /// Number of health requests started so far.
    pub fn health_calls(&self) -> u64 {
        self.health_calls.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> MockConfig {
        self.config.lock().unwrap().clone()
    }

    async fn simulate_latency(latency_ms: u64) {
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }
    }
}

impl Default for MockStatusSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSource for MockStatusSource {
    async fn fetch_app_info(&self) -> Result<AppInfo, FetchError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        let config = self.snapshot();
        Self::simulate_latency(config.latency_ms).await;

        if config.fail_info {
            return Err(FetchError::Status {
                endpoint: INFO_ENDPOINT,
                status: 500,
            });
        }

        Ok(self.info.lock().unwrap().clone())
    }

    async fn fetch_health(&self) -> Result<HealthStatus, FetchError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let config = self.snapshot();
        Self::simulate_latency(config.latency_ms).await;

        if config.fail_health {
            return Err(FetchError::Status {
                endpoint: HEALTH_ENDPOINT,
                status: 503,
            });
        }

        Ok(self.health.lock().unwrap().clone())
    }
}
