//! The uniform response envelope returned by every dispatched command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::CommandStatus;

/// Response envelope: `{status, message, data, timestamp}`.
///
/// `data` serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CommandResponse {
    /// Success or error.
    pub status: CommandStatus,
    /// Human-readable summary.
    pub message: String,
    /// Structured payload.
    pub data: Option<serde_json::Value>,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl CommandResponse {
    /// A successful response carrying a payload.
    pub fn success(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            status: CommandStatus::Success,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// An error response with no payload.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether the status is [`CommandStatus::Success`].
    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_shape() {
        let response = CommandResponse::error("No command provided");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ERROR");
        assert_eq!(json["message"], "No command provided");
        assert!(json["data"].is_null());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn success_envelope_carries_data() {
        let response = CommandResponse::success("ok", serde_json::json!({"n": 1}));
        assert!(response.is_success());
        assert_eq!(response.data, Some(serde_json::json!({"n": 1})));
    }
}
