// Event ingestion, query, and streaming HTTP routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use lookout_core::EventRecord;
use lookout_storage::Database;
use serde::Deserialize;
use std::{convert::Infallible, sync::Arc};
use utoipa::IntoParams;

use crate::common::{error_response, ErrorResponse, IngestEventRequest, ListResponse};
use crate::hub::{EventHub, StreamMessage};
use crate::services::EventService;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub hub: Arc<EventHub>,
}

impl AppState {
    pub fn new(db: Arc<Database>, hub: Arc<EventHub>) -> Self {
        Self {
            service: Arc::new(EventService::new(db, hub.clone())),
            hub,
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", post(ingest_event).get(list_events))
        .route("/v1/events/stream", get(stream_events))
        .with_state(state)
}

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// Query parameters for the events list
#[derive(Debug, Deserialize, IntoParams)]
pub struct EventsQuery {
    /// Only return events for this session.
    pub session_id: Option<String>,
    /// Only return events of this type.
    pub event_type: Option<String>,
    /// Maximum number of events to return. Defaults to 100, capped at 1000.
    #[param(example = 100)]
    pub limit: Option<i64>,
}

/// POST /v1/events - Ingest one event
///
/// Validates the candidate, appends it durably, fans it out to live stream
/// subscribers, and returns the stored record with its assigned id.
#[utoipa::path(
    post,
    path = "/v1/events",
    request_body = IngestEventRequest,
    responses(
        (status = 201, description = "Event stored and broadcast", body = EventRecord),
        (status = 400, description = "Validation failed; nothing was stored", body = ErrorResponse),
        (status = 503, description = "Storage unavailable; nothing was broadcast", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn ingest_event(
    State(state): State<AppState>,
    Json(req): Json<IngestEventRequest>,
) -> Result<(StatusCode, Json<EventRecord>), (StatusCode, Json<ErrorResponse>)> {
    let record = state.service.ingest(req).await.map_err(|e| {
        tracing::warn!("Failed to ingest event: {}", e);
        error_response(e)
    })?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/events - List stored events, newest first
#[utoipa::path(
    get,
    path = "/v1/events",
    params(EventsQuery),
    responses(
        (status = 200, description = "Events newest-first by id", body = ListResponse<EventRecord>),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<ListResponse<EventRecord>>, StatusCode> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let events = state
        .service
        .list(
            query.session_id.as_deref(),
            query.event_type.as_deref(),
            limit,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to list events: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(ListResponse::new(events)))
}

/// GET /v1/events/stream - Live event stream (SSE)
///
/// Delivers every event ingested after the connection opened, in id order,
/// with no replay of history. A subscriber that falls behind receives an
/// `overrun` notice naming the number of dropped events, then resumes with
/// the oldest retained one. Closing the connection deregisters the
/// subscriber.
#[utoipa::path(
    get,
    path = "/v1/events/stream",
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream")
    ),
    tag = "events"
)]
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let subscription = state.hub.subscribe();
    tracing::info!(subscriber_id = %subscription.id(), "Starting event stream");

    // SSE format: event: <type>, data: <full EventRecord JSON>, id: <id>
    let stream = stream::unfold(subscription, |mut subscription| async move {
        match subscription.next().await {
            Some(StreamMessage::Event(record)) => {
                let json = serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string());
                let sse = SseEvent::default()
                    .event(&record.event_type)
                    .data(json)
                    .id(record.id.to_string());
                Some((Ok(sse), subscription))
            }
            Some(StreamMessage::Overrun { missed }) => {
                let sse = SseEvent::default()
                    .event("overrun")
                    .data(serde_json::json!({ "missed": missed }).to_string());
                Some((Ok(sse), subscription))
            }
            None => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
