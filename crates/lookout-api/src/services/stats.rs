// Tool statistics service
//
// Folds the per-event-type counts from the store into success/failure
// buckets using the fixed outcome table; non-outcome types are ignored.

use chrono::Utc;
use lookout_core::{OutcomeCounts, Result, ToolOutcome, ToolStats, ToolUsage};
use lookout_storage::Database;
use std::sync::Arc;

pub struct StatsService {
    db: Arc<Database>,
}

impl StatsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Tool usage and outcome counts over the trailing `window_hours`
    pub async fn tools(&self, window_hours: i64) -> Result<ToolStats> {
        let cutoff = Utc::now().timestamp_millis() - window_hours * 3600 * 1000;
        let rows = self.db.tool_stats(cutoff).await?;

        let mut success_failure = OutcomeCounts::default();
        for count in &rows.outcome_counts {
            match ToolOutcome::classify(&count.event_type) {
                Some(ToolOutcome::Success) => success_failure.success += count.count,
                Some(ToolOutcome::Failure) => success_failure.failure += count.count,
                None => {}
            }
        }

        Ok(ToolStats {
            tool_usage: rows
                .usage
                .into_iter()
                .map(|row| ToolUsage {
                    tool_name: row.tool_name,
                    count: row.count,
                })
                .collect(),
            success_failure,
        })
    }
}
