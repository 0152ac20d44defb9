use crate::errors::ApiError;
use crate::services::students::serializer;
use crate::store::StudentStore;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /students`.
///
/// Returns `200 OK` with every stored student as a JSON array.
pub async fn process(store: web::Data<StudentStore>) -> Result<HttpResponse, ApiError> {
    let students = store.list()?;
    Ok(HttpResponse::Ok().json(serializer::serialize_many(&students)))
}
