//! Maps failures from the serializer and the store onto HTTP responses.
//!
//! - `Validation` → `400 Bad Request`, body is the per-field error map.
//! - `BadRequest` → `400 Bad Request`, `{"detail": ...}` (unreadable JSON body).
//! - `NotFound` → `404 Not Found`, `{"detail": "Not found."}`.
//! - `Storage` → `500 Internal Server Error`; the cause is logged, not returned.

use crate::services::students::serializer::ValidationErrors;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::DetailResponse;
use log::{error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid payload: {0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                warn!("Student {} not found", id);
                ApiError::NotFound
            }
            StoreError::Storage(message) => ApiError::Storage(message),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        warn!("Rejected student payload: {}", errors);
        ApiError::Validation(errors)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::Validation(errors) => response.json(errors),
            ApiError::BadRequest(detail) => response.json(DetailResponse::new(detail.as_str())),
            ApiError::NotFound => response.json(DetailResponse::new("Not found.")),
            ApiError::Storage(message) => {
                error!("Storage failure: {}", message);
                response.json(DetailResponse::new("A server error occurred."))
            }
        }
    }
}
