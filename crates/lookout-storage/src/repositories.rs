// Repository layer for database operations
//
// Append and id assignment are one INSERT .. RETURNING statement: SQLite
// serializes writers, so id order always matches commit order and a larger id
// can never become visible before a smaller one. WAL mode keeps readers on a
// stable snapshot while the writer commits.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::models::*;

/// Idempotent schema for the append-only event log
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp INTEGER NOT NULL,
        session_id TEXT NOT NULL,
        event_type TEXT NOT NULL,
        source_app TEXT,
        model_name TEXT,
        tool_name TEXT,
        payload TEXT,
        summary TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_events_session_id ON events(session_id)",
    "CREATE INDEX IF NOT EXISTS idx_events_event_type ON events(event_type)",
];

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database file at `path` and initialize the schema
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        tracing::debug!(path = %path.display(), "event log ready");
        Ok(db)
    }

    /// In-memory database for dev mode and tests.
    /// A single never-expiring connection keeps the database alive across
    /// pool checkouts.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::new().in_memory(true))
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ============================================
    // Events (append-only log)
    // ============================================

    /// Append one event. The durable write and id assignment commit together;
    /// the returned row carries the assigned id.
    pub async fn create_event(&self, input: CreateEvent) -> Result<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (timestamp, session_id, event_type, source_app, model_name, tool_name, payload, summary, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING id, timestamp, session_id, event_type, source_app, model_name, tool_name, payload, summary, created_at
            "#,
        )
        .bind(input.timestamp)
        .bind(&input.session_id)
        .bind(&input.event_type)
        .bind(&input.source_app)
        .bind(&input.model_name)
        .bind(&input.tool_name)
        .bind(&input.payload)
        .bind(&input.summary)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List events newest-first by id, with optional equality filters
    pub async fn list_events(
        &self,
        session_id: Option<&str>,
        event_type: Option<&str>,
        limit: i64,
    ) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, timestamp, session_id, event_type, source_app, model_name, tool_name, payload, summary, created_at
            FROM events
            WHERE (?1 IS NULL OR session_id = ?1)
              AND (?2 IS NULL OR event_type = ?2)
            ORDER BY id DESC
            LIMIT ?3
            "#,
        )
        .bind(session_id)
        .bind(event_type)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Aggregates (computed fresh on each call)
    // ============================================

    /// Sessions with at least one record after `cutoff_ms`, most recent
    /// first. `model_name` follows the largest id rather than the largest
    /// timestamp - producers may submit with skewed clocks.
    pub async fn active_sessions(&self, cutoff_ms: i64) -> Result<Vec<ActiveSessionRow>> {
        let rows = sqlx::query_as::<_, ActiveSessionRow>(
            r#"
            SELECT
                e.session_id,
                (SELECT model_name FROM events
                 WHERE session_id = e.session_id AND model_name IS NOT NULL
                 ORDER BY id DESC LIMIT 1) AS model_name,
                MAX(e.timestamp) AS last_activity,
                COUNT(*) AS event_count
            FROM events e
            WHERE e.timestamp > ?1
            GROUP BY e.session_id
            ORDER BY last_activity DESC
            "#,
        )
        .bind(cutoff_ms)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Tool usage and per-event-type counts after `cutoff_ms`. Both queries
    /// run inside one read transaction so concurrent appends cannot produce a
    /// torn view.
    pub async fn tool_stats(&self, cutoff_ms: i64) -> Result<ToolStatsRows> {
        let mut tx = self.pool.begin().await?;

        let usage = sqlx::query_as::<_, ToolUsageRow>(
            r#"
            SELECT tool_name, COUNT(*) AS count
            FROM events
            WHERE timestamp > ?1 AND tool_name IS NOT NULL
            GROUP BY tool_name
            ORDER BY count DESC
            "#,
        )
        .bind(cutoff_ms)
        .fetch_all(&mut *tx)
        .await?;

        let outcome_counts = sqlx::query_as::<_, EventTypeCountRow>(
            r#"
            SELECT event_type, COUNT(*) AS count
            FROM events
            WHERE timestamp > ?1
            GROUP BY event_type
            "#,
        )
        .bind(cutoff_ms)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ToolStatsRows {
            usage,
            outcome_counts,
        })
    }
}
