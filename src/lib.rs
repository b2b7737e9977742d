//! Terminal status poller for a deployed web application.
//!
//! On start the poller fetches `/api/info` and `/api/health` once, then
//! re-checks `/api/health` every 30 seconds until shut down:
//!
//! ```text
//! [app-info]
//!   Environment: production
//!   Host: webapp.example.net
//!   Deployment: blue
//!   Version: 1.0.0
//! [health-status]
//!   ✅ healthy
//! ```
//!
//! Any failure (transport, non-2xx status, malformed body) is shown as a
//! fixed message in the affected region and never stops the poller.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`status`]: Endpoint types, HTTP client and mock source
//! - [`render`]: Region content for each fetch outcome
//! - [`display`]: Display regions and the terminal view
//! - [`poller`]: The polling schedule
//! - [`metrics`]: Request counters and latency
//! - [`utils`]: Utility functions

pub mod config;
pub mod display;
pub mod error;
pub mod metrics;
pub mod poller;
pub mod render;
pub mod status;
pub mod utils;

pub use config::Config;
pub use error::{FetchError, PollerError, Result};
pub use poller::{PollerHandle, StatusPoller};
