//! `GET /health` response body.

use serde::{Deserialize, Serialize};

/// Value of [`HealthResponse::status`] for a serving process.
pub const HEALTH_STATUS_OK: &str = "OK";

/// Whether submissions are persisted or only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreStatus {
    /// A hosted store is configured.
    #[serde(rename = "connected")]
    Connected,
    /// Demo mode: submissions are logged only.
    #[serde(rename = "not configured")]
    NotConfigured,
}

/// Health payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always [`HEALTH_STATUS_OK`] when the server answers.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Store configuration state.
    pub supabase: StoreStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_status_uses_human_labels_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&StoreStatus::NotConfigured).unwrap(),
            "\"not configured\""
        );
        assert_eq!(
            serde_json::to_string(&StoreStatus::Connected).unwrap(),
            "\"connected\""
        );
    }
}
