// Active-session roster HTTP routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lookout_core::ActiveSession;
use lookout_storage::Database;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::common::ListResponse;
use crate::services::SessionService;

/// App state for session routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SessionService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(SessionService::new(db)),
        }
    }
}

/// Create session routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/sessions/active", get(active_sessions))
        .with_state(state)
}

/// Query parameters for the active-session roster
#[derive(Debug, Deserialize, IntoParams)]
pub struct ActiveSessionsQuery {
    /// Trailing window in minutes. Defaults to 60.
    #[param(example = 60)]
    pub minutes: Option<i64>,
}

/// GET /v1/sessions/active - Sessions with recent activity
#[utoipa::path(
    get,
    path = "/v1/sessions/active",
    params(ActiveSessionsQuery),
    responses(
        (status = 200, description = "Active sessions, most recent first", body = ListResponse<ActiveSession>),
        (status = 500, description = "Internal server error")
    ),
    tag = "sessions"
)]
pub async fn active_sessions(
    State(state): State<AppState>,
    Query(query): Query<ActiveSessionsQuery>,
) -> Result<Json<ListResponse<ActiveSession>>, StatusCode> {
    let minutes = query.minutes.unwrap_or(60).max(1);

    let sessions = state.service.active(minutes).await.map_err(|e| {
        tracing::error!("Failed to list active sessions: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ListResponse::new(sessions)))
}
