// Aggregate view types
//
// Derived read-only views computed fresh from the event log on each call.
// These are the public shapes returned by the session roster and tool
// statistics queries.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One entry of the active-session roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ActiveSession {
    pub session_id: String,
    /// Most recent model reported for the session, by id order.
    /// `None` when the session never reported one.
    pub model_name: Option<String>,
    /// Largest producer timestamp observed in the window (ms since epoch).
    pub last_activity: i64,
    /// Number of records for the session within the window.
    pub event_count: i64,
}

/// Per-tool record count within the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ToolUsage {
    pub tool_name: String,
    pub count: i64,
}

/// Success vs failure counts over tool-outcome records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OutcomeCounts {
    pub success: i64,
    pub failure: i64,
}

/// Tool statistics over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ToolStats {
    /// Counts grouped by tool, busiest first.
    pub tool_usage: Vec<ToolUsage>,
    pub success_failure: OutcomeCounts,
}
