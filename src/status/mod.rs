//! Status endpoints of the monitored web application.
//!
//! This module handles:
//! - Response types for `/api/info` and `/api/health`
//! - The [`StatusSource`] seam the poller fetches through
//! - HTTP client implementation
//! - Mock source for testing

pub mod client;
pub mod mock;
pub mod source;
pub mod types;

pub use client::HttpStatusSource;
pub use mock::{MockConfig, MockStatusSource};
pub use source::StatusSource;
pub use types::{
    AppInfo, HealthStatus, HEALTH_ENDPOINT, INFO_ENDPOINT, MISSING_FIELD_PLACEHOLDER,
};
