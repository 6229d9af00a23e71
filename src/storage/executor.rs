//! The statement-execution seam between resource handlers and the store.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::fmt;

/// A positional statement parameter.
///
/// Every value is bound as text. Columns of another type cast inside the statement
/// (`$n::numeric`, `$n::bigint`), so values reach the store exactly as the caller wrote
/// them and the store alone decides whether they are valid.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Any failure surfaced by the store while executing a statement.
#[derive(Debug, thiserror::Error)]
pub enum StoreFault {
    #[error("store unreachable: {0}")]
    Connection(String),

    #[error("statement rejected by store: {0}")]
    Statement(String),

    #[error("unexpected row shape: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreFault {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_) => StoreFault::Connection(err.to_string()),
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => StoreFault::Decode(err.to_string()),
            other => StoreFault::Statement(other.to_string()),
        }
    }
}

/// Executes one parameterized statement and returns the affected or selected records.
///
/// Every statement issued through this trait selects a single JSON column named
/// `record`; implementations return those objects in the order the store yields them.
/// Values are never interpolated into `sql`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<JsonValue>, StoreFault>;

    /// Round-trips a trivial statement to confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreFault>;
}
