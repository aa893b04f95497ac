// Common DTOs for the public API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use axum::Json;
use lookout_core::CollectorError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Map a collector error onto its HTTP response
pub fn error_response(e: CollectorError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        CollectorError::InvalidEvent(_) => StatusCode::BAD_REQUEST,
        CollectorError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CollectorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Candidate event submitted by a hook producer.
///
/// Required fields are optional at the wire so that a missing field yields a
/// validation error naming the field, rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct IngestEventRequest {
    /// Producer clock, milliseconds since epoch.
    pub timestamp: Option<i64>,
    /// Logical session the event belongs to. Required, non-empty.
    pub session_id: Option<String>,
    /// Lifecycle event label. Required, non-empty. Also accepted under its
    /// legacy wire name `hook_event_type`.
    #[serde(alias = "hook_event_type")]
    #[schema(example = "PreToolUse")]
    pub event_type: Option<String>,
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
}
