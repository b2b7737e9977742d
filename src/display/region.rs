//! Replaceable blocks of rendered content.

use std::sync::Arc;

use tokio::sync::watch;

/// Identifier of the application info region.
pub const APP_INFO_REGION: &str = "app-info";

/// Identifier of the health status region.
pub const HEALTH_STATUS_REGION: &str = "health-status";

/// Content of a region before its first render.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// A designated area whose content is fully replaced on each render.
///
/// Clones refer to the same region.
#[derive(Debug, Clone)]
pub struct DisplayRegion {
    id: &'static str,
    content: Arc<watch::Sender<String>>,
}

impl DisplayRegion {
    /// Create a region showing the loading placeholder.
    pub fn new(id: &'static str) -> Self {
        let (tx, _rx) = watch::channel(LOADING_PLACEHOLDER.to_string());
        Self {
            id,
            content: Arc::new(tx),
        }
    }

    /// Region identifier.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Replace the whole content. Returns `false` if it was already identical,
    /// in which case subscribers are not notified.
    pub fn replace(&self, content: String) -> bool {
        self.content.send_if_modified(|current| {
            if *current == content {
                false
            } else {
                *current = content;
                true
            }
        })
    }

    /// Current content.
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    /// Receiver that wakes on every content change.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.content.subscribe()
    }
}

/// The two regions the poller writes to.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Application metadata region.
    pub app_info: DisplayRegion,
    /// Health status region.
    pub health_status: DisplayRegion,
}

impl Dashboard {
    /// Create both regions in their loading state.
    pub fn new() -> Self {
        Self {
            app_info: DisplayRegion::new(APP_INFO_REGION),
            health_status: DisplayRegion::new(HEALTH_STATUS_REGION),
        }
    }

    /// Look up a region by identifier.
    pub fn region(&self, id: &str) -> Option<&DisplayRegion> {
        match id {
            APP_INFO_REGION => Some(&self.app_info),
            HEALTH_STATUS_REGION => Some(&self.health_status),
            _ => None,
        }
    }

    /// Both regions, info first.
    pub fn regions(&self) -> [&DisplayRegion; 2] {
        [&self.app_info, &self.health_status]
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_region_shows_placeholder() {
        let region = DisplayRegion::new(HEALTH_STATUS_REGION);
        assert_eq!(region.content(), LOADING_PLACEHOLDER);
        assert_eq!(region.id(), "health-status");
    }

    #[test]
    fn replace_overwrites_in_place() {
        let region = DisplayRegion::new(APP_INFO_REGION);
        assert!(region.replace("first".to_string()));
        assert!(region.replace("second".to_string()));
        assert_eq!(region.content(), "second");
    }

    #[test]
    fn replacing_with_same_content_is_idempotent() {
        let region = DisplayRegion::new(HEALTH_STATUS_REGION);
        let mut rx = region.subscribe();

        assert!(region.replace("✅ ok".to_string()));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        assert!(!region.replace("✅ ok".to_string()));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(region.content(), "✅ ok");
    }

    #[test]
    fn dashboard_lookup_by_id() {
        let dashboard = Dashboard::new();
        assert_eq!(dashboard.region("app-info").unwrap().id(), APP_INFO_REGION);
        assert_eq!(
            dashboard.region("health-status").unwrap().id(),
            HEALTH_STATUS_REGION
        );
        assert!(dashboard.region("footer").is_none());
    }

    #[test]
    fn clones_share_content() {
        let dashboard = Dashboard::new();
        let clone = dashboard.clone();
        clone.health_status.replace("❌ Service unavailable".to_string());
        assert_eq!(dashboard.health_status.content(), "❌ Service unavailable");
    }
}
