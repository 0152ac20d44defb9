//! # Student Service Module
//!
//! Route table for the student CRUD API. Every handler is stateless; the only
//! shared state is the `StudentStore` registered as `web::Data` in `main.rs`.
//!
//! ## Sub-modules:
//! - `serializer`: payload validation and record rendering.
//! - `list`, `create`, `get`, `update`, `delete`: one handler per operation.
//!
//! Trailing slashes are accepted on every path because `main.rs` wraps the app in
//! `NormalizePath::trim()`.

mod create;
mod delete;
mod get;
mod list;
pub mod serializer;
mod update;

use actix_web::web::{delete, get, patch, post, put, scope};
use actix_web::Scope;

/// The base path for all student endpoints.
const API_PATH: &str = "/students";

/// Configures and returns the Actix `Scope` for the student routes.
///
/// # Registered Routes:
///
/// *   **`GET /students`**: `list::process`, all records.
/// *   **`POST /students`**: `create::process`, `201` on success.
/// *   **`GET /students/{id}`**: `get::process`, one record or `404`.
/// *   **`PUT /students/{id}`**: `update::process_put`, full replacement.
/// *   **`PATCH /students/{id}`**: `update::process_patch`, partial update.
/// *   **`DELETE /students/{id}`**: `delete::process`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process_put))
        .route("/{id}", patch().to(update::process_patch))
        .route("/{id}", delete().to(delete::process))
}
