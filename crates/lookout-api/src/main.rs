// Lookout API server
// Decision: One process owns both the store and the hub; ingestion sequences
//           store-then-broadcast so queries and the stream never disagree

use anyhow::{Context, Result};
use axum::http::{header, Method};
use lookout_api::{build_app, config::ServerConfig, hub::EventHub, openapi::ApiDoc, AppContext};
use lookout_storage::Database;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lookout_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("lookout-api starting...");

    let config = ServerConfig::from_env();

    // Open the event store
    let db = if config.dev_mode() {
        tracing::warn!("Running with an in-memory database; events are lost on restart");
        Database::in_memory()
            .await
            .context("Failed to open in-memory database")?
    } else {
        Database::from_path(&config.database_path)
            .await
            .context("Failed to open database")?
    };
    tracing::info!(path = %config.database_path, "Event store ready");

    // Broadcast hub for live stream subscribers
    let hub = EventHub::new(config.stream_capacity);
    tracing::info!(capacity = config.stream_capacity, "Broadcast hub ready");

    let ctx = AppContext::new(Arc::new(db), Arc::new(hub));
    let app = build_app(ctx);

    // Add Swagger UI
    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::ORIGIN,
                    header::CACHE_CONTROL,
                ]),
        )
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
