use crate::errors::ApiError;
use crate::store::StudentStore;
use actix_web::{web, HttpResponse};
use common::responses::{MessageResponse, STUDENT_DELETED};
use log::info;

/// Actix web handler for `DELETE /students/{id}`.
///
/// # Returns
/// - `200 OK` with `{"message": "Student Deleted successfully."}`.
/// - `404 Not Found` if no student has this id.
pub async fn process(
    store: web::Data<StudentStore>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    store.delete(id)?;
    info!("Deleted student with id {}", id);
    Ok(HttpResponse::Ok().json(MessageResponse::new(STUDENT_DELETED)))
}
