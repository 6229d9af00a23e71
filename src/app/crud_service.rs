//! The generic CRUD service.
//!
//! One instance per resource. Each operation validates its input, issues exactly one
//! parameterized statement through the `QueryExecutor`, and classifies the outcome.
//! Written records always come from the statement's `RETURNING` clause.

use crate::domain::resource::{
    FieldKind, RecordCommand, ResourceId, ResourceModel, ValidationError,
};
use crate::storage::{QueryExecutor, SqlValue, StoreFault};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Why an operation did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    #[error("no row matches id {0}")]
    NotFound(ResourceId),

    #[error(transparent)]
    Store(#[from] StoreFault),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// CRUD operations over one resource's table.
#[derive(Clone)]
pub struct CrudService {
    model: Arc<dyn ResourceModel>,
    executor: Arc<dyn QueryExecutor>,
}

impl CrudService {
    pub fn new(model: Arc<dyn ResourceModel>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self { model, executor }
    }

    pub fn model(&self) -> &dyn ResourceModel {
        self.model.as_ref()
    }

    /// All rows, in the order the store returns them.
    pub async fn list(&self) -> Result<Vec<JsonValue>, CrudError> {
        let sql = list_sql(self.model());
        self.run(Operation::List, &sql, &[]).await
    }

    /// Inserts a record and returns it as persisted, including its new id.
    pub async fn create(&self, payload: &JsonValue) -> Result<JsonValue, CrudError> {
        let command = self.validate(payload)?;

        let sql = insert_sql(self.model());
        let rows = self.run(Operation::Create, &sql, command.values()).await?;
        let record = single_row(rows).ok_or_else(|| {
            CrudError::Store(StoreFault::Decode("insert returned no row".to_string()))
        })?;

        info!(
            table = self.model.table_name(),
            id = %record.get(self.model.primary_key_field()).unwrap_or(&JsonValue::Null),
            "record created"
        );
        Ok(record)
    }

    /// Replaces every field of the record with id `raw_id`.
    ///
    /// The identifier is checked before the body. When no row matches, nothing changes.
    pub async fn update(&self, raw_id: &str, payload: &JsonValue) -> Result<JsonValue, CrudError> {
        let id = ResourceId::parse(raw_id).map_err(|e| self.rejected(e))?;
        let command = self.validate(payload)?;

        let mut params = command.values().to_vec();
        params.push(SqlValue::Text(id.as_str().to_string()));

        let sql = update_sql(self.model());
        let rows = self.run(Operation::Update, &sql, &params).await?;
        let record = single_row(rows).ok_or_else(|| CrudError::NotFound(id.clone()))?;

        info!(table = self.model.table_name(), %id, "record updated");
        Ok(record)
    }

    /// Permanently removes the record with id `raw_id`, returning the id and the erased row.
    pub async fn delete(&self, raw_id: &str) -> Result<(ResourceId, JsonValue), CrudError> {
        let id = ResourceId::parse(raw_id).map_err(|e| self.rejected(e))?;

        let sql = delete_sql(self.model());
        let rows = self
            .run(Operation::Delete, &sql, &[SqlValue::Text(id.as_str().to_string())])
            .await?;
        let record = single_row(rows).ok_or_else(|| CrudError::NotFound(id.clone()))?;

        info!(table = self.model.table_name(), %id, "record deleted");
        Ok((id, record))
    }

    fn validate(&self, payload: &JsonValue) -> Result<RecordCommand, CrudError> {
        RecordCommand::from_payload(self.model(), payload).map_err(|e| self.rejected(e))
    }

    fn rejected(&self, err: ValidationError) -> CrudError {
        debug!(table = self.model.table_name(), error = %err, "request rejected");
        CrudError::Validation(err)
    }

    async fn run(
        &self,
        op: Operation,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<JsonValue>, CrudError> {
        self.executor.execute(sql, params).await.map_err(|fault| {
            error!(
                table = self.model.table_name(),
                operation = ?op,
                error = %fault,
                "store fault"
            );
            CrudError::Store(fault)
        })
    }
}

fn single_row(rows: Vec<JsonValue>) -> Option<JsonValue> {
    rows.into_iter().next()
}

fn returning(model: &dyn ResourceModel) -> String {
    format!("RETURNING row_to_json({}.*) AS record", model.table_name())
}

fn placeholder(index: usize, kind: FieldKind) -> String {
    match kind {
        FieldKind::Text => format!("${}", index),
        FieldKind::Numeric => format!("${}::numeric", index),
    }
}

/// `SELECT row_to_json(t.*) AS record FROM t`
pub fn list_sql(model: &dyn ResourceModel) -> String {
    format!(
        "SELECT row_to_json({table}.*) AS record FROM {table}",
        table = model.table_name()
    )
}

/// `INSERT INTO t (a, b) VALUES ($1, $2) RETURNING …`
pub fn insert_sql(model: &dyn ResourceModel) -> String {
    let columns: Vec<&str> = model.fields().iter().map(|f| f.name).collect();
    let placeholders: Vec<String> = model
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, f)| placeholder(idx + 1, f.kind))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) {}",
        model.table_name(),
        columns.join(", "),
        placeholders.join(", "),
        returning(model)
    )
}

/// `UPDATE t SET a = $1, b = $2 WHERE id = $3::bigint RETURNING …`; the id is the last parameter.
pub fn update_sql(model: &dyn ResourceModel) -> String {
    let assignments: Vec<String> = model
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, f)| format!("{} = {}", f.name, placeholder(idx + 1, f.kind)))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${}::bigint {}",
        model.table_name(),
        assignments.join(", "),
        model.primary_key_field(),
        model.fields().len() + 1,
        returning(model)
    )
}

/// `DELETE FROM t WHERE id = $1::bigint RETURNING …`
pub fn delete_sql(model: &dyn ResourceModel) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1::bigint {}",
        model.table_name(),
        model.primary_key_field(),
        returning(model)
    )
}
