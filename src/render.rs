//! Turning fetch outcomes into display region content.
//!
//! Every failure renders to one fixed message per region, regardless of what
//! went wrong or how much of the response was received.

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::FetchError;
use crate::status::{AppInfo, HealthStatus};

/// Message shown in the info region when the info request fails.
pub const INFO_FAILURE_MESSAGE: &str = "Failed to load app information";

/// Message shown in the health region when the health request fails.
pub const HEALTH_UNAVAILABLE_MESSAGE: &str = "Service unavailable";

/// Prefix for a successful health status.
pub const HEALTH_OK_GLYPH: &str = "✅";

/// Prefix for a failed health check.
pub const HEALTH_FAIL_GLYPH: &str = "❌";

/// Output format of region content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Plain text for the terminal.
    #[strum(to_string = "text", serialize = "TEXT")]
    #[default]
    Text,
    /// HTML fragments, as a page would embed them.
    #[strum(to_string = "html", serialize = "HTML")]
    Html,
}

/// Render the app info region.
pub fn render_app_info(
    result: &Result<AppInfo, FetchError>,
    version: &str,
    format: RenderFormat,
) -> String {
    match (result, format) {
        (Ok(info), RenderFormat::Text) => format!(
            "Environment: {}\nHost: {}\nDeployment: {}\nVersion: {}",
            info.environment, info.host, info.deployment, version
        ),
        (Ok(info), RenderFormat::Html) => format!(
            "<p><strong>Environment:</strong> {}</p>\n\
             <p><strong>Host:</strong> {}</p>\n\
             <p><strong>Deployment:</strong> {}</p>\n\
             <p><strong>Version:</strong> {}</p>",
            escape_html(&info.environment),
            escape_html(&info.host),
            escape_html(&info.deployment),
            escape_html(version)
        ),
        (Err(_), RenderFormat::Text) => INFO_FAILURE_MESSAGE.to_string(),
        (Err(_), RenderFormat::Html) => {
            format!("<p class=\"status-error\">{}</p>", INFO_FAILURE_MESSAGE)
        }
    }
}

/// Render the health region.
pub fn render_health(result: &Result<HealthStatus, FetchError>, format: RenderFormat) -> String {
    match (result, format) {
        (Ok(health), RenderFormat::Text) => format!("{} {}", HEALTH_OK_GLYPH, health.status),
        (Ok(health), RenderFormat::Html) => format!(
            "<p class=\"status-healthy\">{} {}</p>",
            HEALTH_OK_GLYPH,
            escape_html(&health.status)
        ),
        (Err(_), RenderFormat::Text) => {
            format!("{} {}", HEALTH_FAIL_GLYPH, HEALTH_UNAVAILABLE_MESSAGE)
        }
        (Err(_), RenderFormat::Html) => format!(
            "<p class=\"status-error\">{} {}</p>",
            HEALTH_FAIL_GLYPH, HEALTH_UNAVAILABLE_MESSAGE
        ),
    }
}

/// Escape text for inclusion in HTML element content.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
