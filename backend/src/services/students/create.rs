use crate::errors::ApiError;
use crate::services::students::serializer;
use crate::store::StudentStore;
use actix_web::{web, HttpResponse};
use common::responses::{MessageResponse, STUDENT_CREATED};
use log::info;
use serde_json::Value;

/// Actix web handler for `POST /students`.
///
/// # Returns
/// - `201 Created` with `{"message": "Student Created successfully."}`.
/// - `400 Bad Request` with the per-field errors if the payload is invalid.
pub async fn process(
    store: web::Data<StudentStore>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let fields = serializer::deserialize(&payload)?;
    let student = store.create(fields)?;
    info!("Created student {} with id {}", student, student.id);
    Ok(HttpResponse::Created().json(MessageResponse::new(STUDENT_CREATED)))
}
