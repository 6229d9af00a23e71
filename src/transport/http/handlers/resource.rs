//! Generic handlers shared by every registered resource.

use crate::app::Operation;
use crate::transport::http::types::{ApiError, MessageBody, ResourceState};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;
use tracing::debug;

pub async fn list_handler(
    State(state): State<ResourceState>,
) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let records = state
        .service
        .list()
        .await
        .map_err(|e| ApiError::from_crud(state.service.model(), Operation::List, e))?;
    Ok(Json(records))
}

pub async fn create_handler(
    State(state): State<ResourceState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<JsonValue>), ApiError> {
    let payload = body_or_empty(body);
    let record = state
        .service
        .create(&payload)
        .await
        .map_err(|e| ApiError::from_crud(state.service.model(), Operation::Create, e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_handler(
    State(state): State<ResourceState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = id_or_blank(id);
    let payload = body_or_empty(body);
    let record = state
        .service
        .update(&id, &payload)
        .await
        .map_err(|e| ApiError::from_crud(state.service.model(), Operation::Update, e))?;
    Ok(Json(record))
}

pub async fn delete_handler(
    State(state): State<ResourceState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = id_or_blank(id);
    let (id, _erased) = state
        .service
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_crud(state.service.model(), Operation::Delete, e))?;
    Ok(Json(MessageBody {
        mensagem: state.service.model().deleted_message(&id),
    }))
}

// A segment that cannot be read as text names no record, so it is reported as a missing id.
fn id_or_blank(id: Result<Path<String>, PathRejection>) -> String {
    match id {
        Ok(Path(id)) => id,
        Err(e) => {
            debug!(error = %e, "path id is unreadable; treating it as blank");
            String::new()
        }
    }
}

// An unreadable body carries no fields, so it fails presence validation like an empty one.
fn body_or_empty(body: Result<Json<JsonValue>, JsonRejection>) -> JsonValue {
    match body {
        Ok(Json(v)) => v,
        Err(e) => {
            debug!(error = %e, "request body is not JSON; treating it as empty");
            JsonValue::Object(serde_json::Map::new())
        }
    }
}
