//! Status poller: fetches app info once, health on a fixed interval.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::display::{Dashboard, DisplayRegion};
use crate::metrics;
use crate::render::{render_app_info, render_health, RenderFormat};
use crate::status::StatusSource;

/// Default period between recurring health checks.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest accepted health check period.
pub const MIN_HEALTH_INTERVAL: Duration = Duration::from_millis(1);

/// Longest accepted health check period (one day).
pub const MAX_HEALTH_INTERVAL: Duration = Duration::from_secs(86_400);

/// Default version string shown with the app info.
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Polls a [`StatusSource`] and renders results into a [`Dashboard`].
///
/// Cheap to clone; clones share the source and the regions.
#[derive(Debug)]
pub struct StatusPoller<S> {
    source: Arc<S>,
    dashboard: Dashboard,
    version: Arc<str>,
    format: RenderFormat,
    interval: Duration,
    /// Closed when the owning [`PollerHandle`] shuts down; renders are
    /// skipped afterwards.
    gate: Arc<Mutex<bool>>,
}

impl<S> Clone for StatusPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            dashboard: self.dashboard.clone(),
            version: Arc::clone(&self.version),
            format: self.format,
            interval: self.interval,
            gate: Arc::clone(&self.gate),
        }
    }
}

impl<S: StatusSource> StatusPoller<S> {
    /// Create a poller with the default interval, version and text output.
    pub fn new(source: S, dashboard: Dashboard) -> Self {
        Self {
            source: Arc::new(source),
            dashboard,
            version: Arc::from(DEFAULT_APP_VERSION),
            format: RenderFormat::default(),
            interval: DEFAULT_HEALTH_INTERVAL,
            gate: Arc::new(Mutex::new(true)),
        }
    }

    /// Create a poller using interval, version and format from config.
    pub fn from_config(source: S, dashboard: Dashboard, config: &Config) -> Self {
        Self::new(source, dashboard)
            .with_interval(config.health_interval())
            .with_version(&config.app_version)
            .with_format(config.render_format)
    }

    /// Set the recurring health check period, clamped to
    /// [`MIN_HEALTH_INTERVAL`]..=[`MAX_HEALTH_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        let clamped = interval.clamp(MIN_HEALTH_INTERVAL, MAX_HEALTH_INTERVAL);
        if clamped != interval {
            warn!(
                requested_secs = interval.as_secs_f64(),
                used_secs = clamped.as_secs_f64(),
                "Health interval out of range, clamped"
            );
        }
        self.interval = clamped;
        self
    }

    /// Set the version string shown with the app info.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Arc::from(version);
        self
    }

    /// Set the region content format.
    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    /// Regions this poller writes to.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Recurring health check period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch app info once and render it into the info region.
    pub async fn load_app_info(&self) {
        let result = self.source.fetch_app_info().await;
        if let Err(e) = &result {
            warn!(error = %e, "App info request failed");
        }

        let content = render_app_info(&result, &self.version, self.format);
        self.render(&self.dashboard.app_info, content);
    }

    /// Fetch health once and render it into the health region.
    pub async fn check_health(&self) {
        let result = self.source.fetch_health().await;
        match &result {
            Ok(health) => debug!(status = %health.status, "Health check completed"),
            Err(e) => warn!(error = %e, "Health check failed"),
        }

        let content = render_health(&result, self.format);
        self.render(&self.dashboard.health_status, content);
    }

    /// Load app info and check health once, then re-check health every
    /// interval until the returned handle is shut down or dropped.
    pub fn initialize(&self) -> PollerHandle {
        info!(
            interval_secs = self.interval.as_secs_f64(),
            "Starting status poller"
        );

        let gate = Arc::new(Mutex::new(true));
        let poller = Self {
            gate: Arc::clone(&gate),
            ..self.clone()
        };

        PollerHandle {
            task: tokio::spawn(poller.run()),
            gate,
        }
    }

    async fn run(self) {
        // Owns every in-flight fetch; dropping it on abort cancels them.
        let mut in_flight = JoinSet::new();

        let info = self.clone();
        in_flight.spawn(async move { info.load_app_info().await });
        let health = self.clone();
        in_flight.spawn(async move { health.check_health().await });

        let now = Instant::now();
        let first_tick = now.checked_add(self.interval).unwrap_or(now);
        let mut ticker = interval_at(first_tick, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    metrics::inc_health_ticks();
                    // A slow previous check may still be running; it is not awaited.
                    let poller = self.clone();
                    in_flight.spawn(async move { poller.check_health().await });
                }
                Some(joined) = in_flight.join_next() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            warn!(error = %e, "Status fetch task panicked");
                        }
                    }
                }
            }
        }
    }

    fn render(&self, region: &DisplayRegion, content: String) {
        let open = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if !*open {
            debug!(region = region.id(), "Poller shut down, render skipped");
            return;
        }

        if region.replace(content) {
            debug!(region = region.id(), "Region updated");
        }
    }
}

/// Owns the recurring schedule started by [`StatusPoller::initialize`].
///
/// Dropping the handle cancels the schedule.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
    gate: Arc<Mutex<bool>>,
}

impl PollerHandle {
    /// Stop the timer and every in-flight fetch. No region is written after
    /// this returns.
    pub async fn shutdown(mut self) {
        self.close();
        self.task.abort();

        if let Err(e) = (&mut self.task).await {
            if e.is_panic() {
                warn!(error = %e, "Poller task panicked");
            }
        }

        info!("Status poller stopped");
    }

    /// Whether the schedule has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn close(&self) {
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.close();
        self.task.abort();
    }
}
