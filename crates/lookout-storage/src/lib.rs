// SQLite storage layer with sqlx
//
// This crate owns the durable append-only event log: schema initialization,
// appends with monotonic id assignment, filtered queries, and the aggregate
// views computed from the log.

pub mod models;
pub mod repositories;

pub use models::*;
pub use repositories::Database;
