//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::render::RenderFormat;

/// Longest accepted `HEALTH_INTERVAL_SECS` (one day).
pub const MAX_HEALTH_INTERVAL_SECS: u64 = 86_400;

/// Filter directive used when verbose logging is on.
pub const VERBOSE_LOG_DIRECTIVE: &str = "webapp_status=debug,info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Target Application ===
    /// Base URL of the web application exposing `/api/info` and `/api/health`.
    #[serde(default = "default_base_url")]
    pub status_base_url: String,

    /// Version string shown in the app info summary.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    // === Polling ===
    /// Seconds between recurring health checks.
    #[serde(default = "default_health_interval")]
    pub health_interval_secs: u64,

    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_ms: u64,

    /// Connection establishment timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub http_connect_timeout_ms: u64,

    // === Output ===
    /// Region content format: text or html.
    #[serde(default)]
    pub render_format: RenderFormat,

    /// Port for the Prometheus exporter; disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_health_interval() -> u64 {
    30
}

fn default_http_timeout() -> u64 {
    10_000
}

fn default_connect_timeout() -> u64 {
    2_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_base_url: default_base_url(),
            app_version: default_app_version(),
            health_interval_secs: default_health_interval(),
            http_timeout_ms: default_http_timeout(),
            http_connect_timeout_ms: default_connect_timeout(),
            render_format: RenderFormat::default(),
            metrics_port: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.status_base_url)
            .map_err(|e| format!("STATUS_BASE_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err("STATUS_BASE_URL must use http or https".to_string());
        }

        if self.health_interval_secs == 0 {
            return Err("HEALTH_INTERVAL_SECS must be at least 1".to_string());
        }

        if self.health_interval_secs > MAX_HEALTH_INTERVAL_SECS {
            return Err(format!(
                "HEALTH_INTERVAL_SECS must be at most {}",
                MAX_HEALTH_INTERVAL_SECS
            ));
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.http_connect_timeout_ms == 0 {
            return Err("HTTP_CONNECT_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Tracing filter directive: verbose wins over `RUST_LOG`.
    pub fn log_directive(&self) -> &str {
        if self.verbose {
            VERBOSE_LOG_DIRECTIVE
        } else {
            &self.rust_log
        }
    }

    /// Period of the recurring health check.
    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    /// Whole-request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Connection establishment timeout.
    pub fn http_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.http_connect_timeout_ms)
    }
}
