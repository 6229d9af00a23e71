//! Turns loosely typed request input into typed, immutable commands.
//!
//! Validation here is presence only. A value of the wrong type is passed through as
//! text and left for the store to accept or reject.

use super::{FieldKind, FieldSpec, ResourceModel};
use crate::storage::SqlValue;
use serde_json::Value as JsonValue;
use std::fmt;

/// Which write a payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier is missing")]
    MissingId,

    #[error("required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Primary key exactly as it appeared in the request path.
///
/// Only presence is checked. Whether the text names an integer is decided by the store,
/// which casts it inside the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        Ok(ResourceId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The full field set for an insert or update, in the model's positional order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCommand {
    values: Vec<SqlValue>,
}

impl RecordCommand {
    /// Extracts every field the model requires from `payload`.
    ///
    /// A non-object payload is treated as an empty one. An `id` key, if present, is ignored.
    pub fn from_payload(
        model: &dyn ResourceModel,
        payload: &JsonValue,
    ) -> Result<Self, ValidationError> {
        let empty = serde_json::Map::new();
        let obj = payload.as_object().unwrap_or(&empty);

        let mut values = Vec::with_capacity(model.fields().len());
        let mut missing = Vec::new();
        for field in model.fields() {
            match extract(field, obj.get(field.name)) {
                Some(v) => values.push(SqlValue::Text(v)),
                None => missing.push(field.name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

fn extract(field: &FieldSpec, value: Option<&JsonValue>) -> Option<String> {
    let value = value?;
    match field.kind {
        // Falsy values (empty string, false, 0) count as absent for text columns.
        FieldKind::Text => match value {
            JsonValue::Null | JsonValue::Bool(false) => None,
            JsonValue::String(s) if s.is_empty() => None,
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        },
        FieldKind::Numeric => match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        },
    }
}
