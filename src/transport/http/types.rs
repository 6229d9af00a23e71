use crate::app::{CrudError, CrudService, Operation};
use crate::domain::resource::{ResourceModel, ValidationError, WriteKind};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Router state for one resource's routes.
#[derive(Clone)]
pub struct ResourceState {
    pub service: CrudService,
}

/// Body for validation failures, not-found results and delete confirmations.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MessageBody {
    pub mensagem: String,
}

/// Body for store failures.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FaultBody {
    pub erro: String,
}

/// A failed request, already carrying the text the caller will see.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Maps a service failure to the resource's wire message for `op`.
    ///
    /// Store fault details are not forwarded; they were logged where they occurred.
    pub fn from_crud(model: &dyn ResourceModel, op: Operation, err: CrudError) -> Self {
        match err {
            CrudError::Validation(ValidationError::MissingId) => {
                ApiError::BadRequest(model.missing_id_message())
            }
            CrudError::Validation(ValidationError::MissingFields(_)) => {
                let kind = match op {
                    Operation::Update => WriteKind::Update,
                    _ => WriteKind::Create,
                };
                ApiError::BadRequest(model.missing_fields_message(kind))
            }
            CrudError::NotFound(_) => ApiError::NotFound(model.not_found_message()),
            CrudError::Store(_) => ApiError::Internal(match op {
                Operation::List => model.list_failed_message(),
                Operation::Create => model.create_failed_message(),
                Operation::Update => model.update_failed_message(),
                Operation::Delete => model.delete_failed_message(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(mensagem) => {
                (StatusCode::BAD_REQUEST, Json(MessageBody { mensagem })).into_response()
            }
            ApiError::NotFound(mensagem) => {
                (StatusCode::NOT_FOUND, Json(MessageBody { mensagem })).into_response()
            }
            ApiError::Internal(erro) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(FaultBody { erro })).into_response()
            }
        }
    }
}
