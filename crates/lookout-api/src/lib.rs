// Lookout API server library
//
// Route modules each own their AppState and expose a `routes()` Router;
// `build_app` merges them over the shared database and broadcast hub.

pub mod common;
pub mod config;
pub mod events;
pub mod hub;
pub mod openapi;
pub mod services;
pub mod sessions;
pub mod stats;

use axum::{routing::get, Json, Router};
use lookout_storage::Database;
use serde::Serialize;
use std::sync::Arc;

use crate::hub::EventHub;

/// Shared handles wired into every route module
#[derive(Clone)]
pub struct AppContext {
    pub db: Arc<Database>,
    pub hub: Arc<EventHub>,
}

impl AppContext {
    pub fn new(db: Arc<Database>, hub: Arc<EventHub>) -> Self {
        Self { db, hub }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router over the given context
pub fn build_app(ctx: AppContext) -> Router {
    let events_state = events::AppState::new(ctx.db.clone(), ctx.hub.clone());
    let sessions_state = sessions::AppState::new(ctx.db.clone());
    let stats_state = stats::AppState::new(ctx.db.clone());

    Router::new()
        .route("/health", get(health))
        .merge(events::routes(events_state))
        .merge(sessions::routes(sessions_state))
        .merge(stats::routes(stats_state))
}
