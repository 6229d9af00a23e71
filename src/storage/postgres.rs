//! PostgreSQL-backed `QueryExecutor`.

use crate::infra::config::DatabaseConfig;
use crate::storage::executor::{QueryExecutor, SqlValue, StoreFault};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

/// Executes statements against a shared connection pool.
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool without connecting; the first statement opens a connection.
    ///
    /// This lets the server start listening even while the store is down.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(config.connect_options());
        Self::new(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<JsonValue>, StoreFault> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlValue::Text(s) => query.bind(s.clone()),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let record: JsonValue = row.try_get("record")?;
            records.push(record);
        }
        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreFault> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
