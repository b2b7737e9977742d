//! The seam between the poller and the endpoints it polls.

use std::future::Future;

use crate::error::FetchError;

use super::types::{AppInfo, HealthStatus};

/// Something that can answer the two status queries.
///
/// Each call is one independent request. Implementations must not retry or
/// cache.
pub trait StatusSource: Send + Sync + 'static {
    /// Fetch application metadata.
    fn fetch_app_info(&self) -> impl Future<Output = Result<AppInfo, FetchError>> + Send;

    /// Fetch the current health status.
    fn fetch_health(&self) -> impl Future<Output = Result<HealthStatus, FetchError>> + Send;
}
