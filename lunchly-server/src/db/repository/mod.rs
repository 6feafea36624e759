//! Repository Module
//!
//! Record managers for customers and reservations. Each one owns a handle to
//! the query executor and nothing else: no logging, no retries, no caching.
//! Every store failure is returned to the caller unchanged.

pub mod customer;
pub mod reservation;

// Re-exports
pub use customer::CustomerRepository;
pub use reservation::ReservationRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles for the query executor

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{RepoError, RepoResult};
    use crate::db::executor::{QueryExecutor, Row, SharedExecutor, SqlValue};
    use crate::db::DbService;

    /// Fresh in-memory SQLite with migrations applied
    pub async fn sqlite_executor() -> SharedExecutor {
        DbService::in_memory().await.unwrap().executor()
    }

    /// Records every statement and replays canned responses in order.
    /// With no canned response left it answers with an empty row set.
    #[derive(Default)]
    pub struct RecordingExecutor {
        calls: Mutex<Vec<(String, Vec<SqlValue>)>>,
        responses: Mutex<VecDeque<RepoResult<Vec<Row>>>>,
    }

    impl RecordingExecutor {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn respond(&self, response: RepoResult<Vec<Row>>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub fn fail_with(&self, message: &str) {
            self.respond(Err(RepoError::Database(message.to_string())));
        }

        pub fn calls(&self) -> Vec<(String, Vec<SqlValue>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryExecutor for RecordingExecutor {
        async fn execute(&self, sql: &str, args: &[SqlValue]) -> RepoResult<Vec<Row>> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), args.to_vec()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Single-column `id` row, as returned by `... RETURNING id`
    pub fn id_row(id: i64) -> Row {
        Row::new(vec![("id".to_string(), SqlValue::Integer(id))])
    }
}
