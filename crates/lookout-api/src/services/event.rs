// Event service: ingestion sequencing and log queries
//
// Ingestion is the single sequencing point: validate, durably append, then
// fan out. Because the append commits before publish is called, a stream
// subscriber can never observe an event that a concurrent query would fail
// to find.

use lookout_core::{CollectorError, EventRecord, Result};
use lookout_storage::{CreateEvent, Database};
use std::sync::Arc;

use crate::common::IngestEventRequest;
use crate::hub::EventHub;

pub struct EventService {
    db: Arc<Database>,
    hub: Arc<EventHub>,
}

impl EventService {
    pub fn new(db: Arc<Database>, hub: Arc<EventHub>) -> Self {
        Self { db, hub }
    }

    /// Accept one candidate event: validate, append, publish, return the
    /// stored record with its assigned id.
    ///
    /// Validation failures and storage failures leave no side effects; in
    /// particular nothing is broadcast unless the write committed.
    pub async fn ingest(&self, req: IngestEventRequest) -> Result<EventRecord> {
        let input = validate(req)?;

        let row = self
            .db
            .create_event(input)
            .await
            .map_err(|e| CollectorError::storage(e.to_string()))?;

        let record = EventRecord::from(row);
        let reached = self.hub.publish(record.clone());
        tracing::debug!(
            event_id = record.id,
            event_type = %record.event_type,
            subscribers = reached,
            "event ingested"
        );

        Ok(record)
    }

    /// List stored events newest-first by id
    pub async fn list(
        &self,
        session_id: Option<&str>,
        event_type: Option<&str>,
        limit: i64,
    ) -> Result<Vec<EventRecord>> {
        let rows = self.db.list_events(session_id, event_type, limit).await?;
        Ok(rows.into_iter().map(EventRecord::from).collect())
    }
}

/// Check required fields and produce the storage input.
/// `timestamp`, `session_id`, and `event_type` must be present; the string
/// fields must be non-empty.
fn validate(req: IngestEventRequest) -> Result<CreateEvent> {
    let timestamp = req
        .timestamp
        .ok_or_else(|| CollectorError::invalid("missing field: timestamp"))?;

    let session_id = req
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CollectorError::invalid("missing field: session_id"))?;

    let event_type = req
        .event_type
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CollectorError::invalid("missing field: event_type"))?;

    Ok(CreateEvent {
        timestamp,
        session_id,
        event_type,
        source_app: req.source_app,
        model_name: req.model_name,
        tool_name: req.tool_name,
        payload: req.payload,
        summary: req.summary,
    })
}
