// Session roster service

use chrono::Utc;
use lookout_core::{ActiveSession, Result};
use lookout_storage::Database;
use std::sync::Arc;

pub struct SessionService {
    db: Arc<Database>,
}

impl SessionService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Sessions with at least one record in the trailing `window_minutes`,
    /// most recently active first
    pub async fn active(&self, window_minutes: i64) -> Result<Vec<ActiveSession>> {
        let cutoff = Utc::now().timestamp_millis() - window_minutes * 60 * 1000;
        let rows = self.db.active_sessions(cutoff).await?;

        Ok(rows
            .into_iter()
            .map(|row| ActiveSession {
                session_id: row.session_id,
                model_name: row.model_name,
                last_activity: row.last_activity,
                event_count: row.event_count,
            })
            .collect())
    }
}
