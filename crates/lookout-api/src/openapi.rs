// OpenAPI documentation

use lookout_core::{ActiveSession, EventRecord, OutcomeCounts, ToolStats, ToolUsage};
use utoipa::OpenApi;

use crate::common::{ErrorResponse, IngestEventRequest, ListResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::events::ingest_event,
        crate::events::list_events,
        crate::events::stream_events,
        crate::sessions::active_sessions,
        crate::stats::tool_stats,
    ),
    components(
        schemas(
            EventRecord,
            IngestEventRequest,
            ErrorResponse,
            ListResponse<EventRecord>,
            ActiveSession,
            ListResponse<ActiveSession>,
            ToolStats,
            ToolUsage,
            OutcomeCounts,
        )
    ),
    tags(
        (name = "events", description = "Event ingestion, queries, and live streaming (SSE)"),
        (name = "sessions", description = "Active session roster"),
        (name = "stats", description = "Tool usage statistics")
    ),
    info(
        title = "Lookout API",
        version = "0.1.0",
        description = "Event store and live broadcast hub for agent session telemetry",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;
