//! Response shapes returned by the status endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Path of the application metadata endpoint.
pub const INFO_ENDPOINT: &str = "/api/info";

/// Path of the liveness endpoint.
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// Text shown for a field the response did not carry.
pub const MISSING_FIELD_PLACEHOLDER: &str = "undefined";

/// Descriptive metadata about the running deployment.
///
/// The endpoint contract is not enforced: any JSON object is accepted,
/// missing fields read as [`MISSING_FIELD_PLACEHOLDER`] and non-string
/// values keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Environment name (e.g., "production").
    #[serde(default = "missing_field", deserialize_with = "lenient_text")]
    pub environment: String,
    /// Host serving the application.
    #[serde(default = "missing_field", deserialize_with = "lenient_text")]
    pub host: String,
    /// Deployment label.
    #[serde(default = "missing_field", deserialize_with = "lenient_text")]
    pub deployment: String,
}

/// Liveness of the backing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status reported by the service (e.g., "healthy").
    #[serde(default = "missing_field", deserialize_with = "lenient_text")]
    pub status: String,
}

fn missing_field() -> String {
    MISSING_FIELD_PLACEHOLDER.to_string()
}

/// Strings as-is, anything else as its JSON text (`true`, `200`, `null`).
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        other => other.to_string(),
    })
}
