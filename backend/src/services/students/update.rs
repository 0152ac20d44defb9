//! Full (`PUT`) and partial (`PATCH`) updates of a single student.
//!
//! The payload is validated before the store is touched, so an invalid body is
//! reported as `400` even when the id does not exist. The validated values are
//! written onto the stored record; fields absent from a `PATCH` keep their value.

use crate::errors::ApiError;
use crate::services::students::serializer;
use crate::store::StudentStore;
use actix_web::{web, HttpResponse};
use common::model::student::StudentPatch;
use common::responses::{MessageResponse, STUDENT_UPDATED};
use log::info;
use serde_json::Value;

/// Actix web handler for `PUT /students/{id}`. All four fields are required.
pub async fn process_put(
    store: web::Data<StudentStore>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let fields = serializer::deserialize(&payload)?;
    apply(&store, id.into_inner(), StudentPatch::from(fields))
}

/// Actix web handler for `PATCH /students/{id}`. Only supplied fields change.
pub async fn process_patch(
    store: web::Data<StudentStore>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let patch = serializer::deserialize_partial(&payload)?;
    apply(&store, id.into_inner(), patch)
}

fn apply(store: &StudentStore, id: i64, patch: StudentPatch) -> Result<HttpResponse, ApiError> {
    let student = store.update(id, &patch)?;
    info!("Updated student {} with id {}", student, student.id);
    Ok(HttpResponse::Ok().json(MessageResponse::new(STUDENT_UPDATED)))
}
