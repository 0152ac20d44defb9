use crate::errors::ApiError;
use crate::services::students::serializer;
use crate::store::StudentStore;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /students/{id}`.
///
/// # Returns
/// - `200 OK` with the record as a flat JSON object.
/// - `404 Not Found` if no student has this id.
pub async fn process(
    store: web::Data<StudentStore>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let student = store.get(id.into_inner())?;
    Ok(HttpResponse::Ok().json(serializer::serialize(&student)))
}
