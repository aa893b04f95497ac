// Event record entity
//
// The unit of storage and transport. Records are immutable once stored;
// `id` is assigned by the event store and is the sole ordering key for both
// queries and the live stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One immutable entry of the append-only event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventRecord {
    /// Store-assigned, strictly increasing identity. Never reused.
    pub id: i64,
    /// Producer clock, milliseconds since epoch. Window filtering only;
    /// producers may submit with clock skew, so `id` defines order.
    pub timestamp: i64,
    /// Logical session the event belongs to. Opaque to the store.
    pub session_id: String,
    /// Lifecycle event label, e.g. "SessionStart" or "PostToolUse".
    /// The store filters on it but never interprets its semantics.
    pub event_type: String,
    /// Application that emitted the event.
    pub source_app: Option<String>,
    /// Model the session was running when the event fired.
    pub model_name: Option<String>,
    /// Tool involved, for tool lifecycle events.
    pub tool_name: Option<String>,
    /// Opaque structured document, stored verbatim.
    pub payload: Option<serde_json::Value>,
    /// Short human-readable description.
    pub summary: Option<String>,
    /// Server-side receipt time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serialization_round_trip() {
        let record = EventRecord {
            id: 7,
            timestamp: 1_700_000_000_000,
            session_id: "session_abc123".to_string(),
            event_type: "PreToolUse".to_string(),
            source_app: Some("claude-code".to_string()),
            model_name: Some("claude-sonnet-4-5".to_string()),
            tool_name: Some("Bash".to_string()),
            payload: Some(json!({"tool_use_id": "tool_use_1", "nested": {"k": [1, 2]}})),
            summary: Some("Running tests".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["event_type"], "PreToolUse");
        assert_eq!(json["payload"]["nested"]["k"][1], 2);

        let back: EventRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let record = EventRecord {
            id: 1,
            timestamp: 0,
            session_id: "s".to_string(),
            event_type: "Notification".to_string(),
            source_app: None,
            model_name: None,
            tool_name: None,
            payload: None,
            summary: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["payload"].is_null());
        assert!(json["tool_name"].is_null());
    }
}
