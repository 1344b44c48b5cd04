use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorBody;

#[derive(Debug, Error, PartialEq)]
pub enum StudioError {
    #[error("Class with ID {0} not found")]
    ClassNotFound(u64),
    #[error("Class with ID {0} has already started and can no longer be booked")]
    ClassExpired(u64),
    #[error("This class is full. No available slots.")]
    ClassFull(u64),
    #[error("You have already booked this class.")]
    AlreadyBooked { class_id: u64, email: String },
    #[error("storage unavailable: {0}")]
    Storage(String),
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Validation(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::Internal(msg) => msg,
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<StudioError> for ApiError {
    fn from(value: StudioError) -> Self {
        match value {
            StudioError::ClassNotFound(_) => ApiError::NotFound(value.to_string()),
            StudioError::ClassExpired(_)
            | StudioError::ClassFull(_)
            | StudioError::AlreadyBooked { .. } => ApiError::Conflict(value.to_string()),
            StudioError::Storage(err) => {
                error!("storage error: {err}");
                ApiError::Internal("An unexpected error occurred. Please try again.".into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::JsonDataError(_) => ApiError::Validation(value.body_text()),
            _ => ApiError::BadRequest(value.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        ApiError::Validation(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::Validation(value.body_text())
    }
}
