// Tool statistics HTTP routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lookout_core::ToolStats;
use lookout_storage::Database;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::services::StatsService;

/// App state for stats routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StatsService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(StatsService::new(db)),
        }
    }
}

/// Create stats routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/stats/tools", get(tool_stats))
        .with_state(state)
}

/// Query parameters for tool statistics
#[derive(Debug, Deserialize, IntoParams)]
pub struct ToolStatsQuery {
    /// Trailing window in hours. Defaults to 1.
    #[param(example = 1)]
    pub hours: Option<i64>,
}

/// GET /v1/stats/tools - Tool usage and success/failure counts
#[utoipa::path(
    get,
    path = "/v1/stats/tools",
    params(ToolStatsQuery),
    responses(
        (status = 200, description = "Tool statistics for the window", body = ToolStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "stats"
)]
pub async fn tool_stats(
    State(state): State<AppState>,
    Query(query): Query<ToolStatsQuery>,
) -> Result<Json<ToolStats>, StatusCode> {
    let hours = query.hours.unwrap_or(1).max(1);

    let stats = state.service.tools(hours).await.map_err(|e| {
        tracing::error!("Failed to compute tool stats: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(stats))
}
