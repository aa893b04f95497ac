// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use lookout_core::EventRecord;
use sqlx::FromRow;

// ============================================
// Event rows
// ============================================

/// Stored event row
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub timestamp: i64,
    pub session_id: String,
    pub event_type: String,
    pub source_app: Option<String>,
    pub model_name: Option<String>,
    pub tool_name: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventRow> for EventRecord {
    fn from(row: EventRow) -> Self {
        EventRecord {
            id: row.id,
            timestamp: row.timestamp,
            session_id: row.session_id,
            event_type: row.event_type,
            source_app: row.source_app,
            model_name: row.model_name,
            tool_name: row.tool_name,
            payload: row.payload,
            summary: row.summary,
            created_at: row.created_at,
        }
    }
}

/// Validated input for appending one event. The store assigns `id` and
/// `created_at` at write time.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub timestamp: i64,
    pub session_id: String,
    pub event_type: String,
    pub source_app: Option<String>,
    pub model_name: Option<String>,
    pub tool_name: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub summary: Option<String>,
}

// ============================================
// Aggregate rows
// ============================================

/// Active-session roster entry
#[derive(Debug, Clone, FromRow)]
pub struct ActiveSessionRow {
    pub session_id: String,
    pub model_name: Option<String>,
    pub last_activity: i64,
    pub event_count: i64,
}

/// Per-tool record count within a window
#[derive(Debug, Clone, FromRow)]
pub struct ToolUsageRow {
    pub tool_name: String,
    pub count: i64,
}

/// Record count per event type within a window
#[derive(Debug, Clone, FromRow)]
pub struct EventTypeCountRow {
    pub event_type: String,
    pub count: i64,
}

/// Tool statistics snapshot. Both result sets come from a single read
/// transaction so they describe the same instant of the log.
#[derive(Debug, Clone)]
pub struct ToolStatsRows {
    pub usage: Vec<ToolUsageRow>,
    pub outcome_counts: Vec<EventTypeCountRow>,
}
