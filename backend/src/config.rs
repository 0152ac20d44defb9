//! # Application Configuration
//!
//! The server reads its settings once at startup from environment variables.
//! `main.rs` builds the store and the JSON extractor settings from the resulting
//! [`AppConfig`].
//!
//! | Variable              | Default           |
//! |-----------------------|-------------------|
//! | `STUDENTS_HOST`       | `127.0.0.1`       |
//! | `STUDENTS_PORT`       | `8080`            |
//! | `STUDENTS_DATABASE`   | `students.sqlite` |
//! | `STUDENTS_JSON_LIMIT` | `1048576` (bytes) |
//! | `STUDENTS_WORKERS`    | actix default     |
//!
//! `STUDENTS_DATABASE=:memory:` runs against a throwaway in-memory database.

use crate::errors::ApiError;
use actix_web::{error, web, HttpRequest};
use std::env;
use std::num::NonZeroUsize;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "students.sqlite";
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
    /// Number of HTTP workers. `None` keeps the actix default (one per core).
    pub workers: Option<NonZeroUsize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE.to_string(),
            json_limit: DEFAULT_JSON_LIMIT,
            workers: None,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        Ok(AppConfig {
            host: lookup("STUDENTS_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "STUDENTS_PORT")?.unwrap_or(defaults.port),
            database_path: lookup("STUDENTS_DATABASE").unwrap_or(defaults.database_path),
            json_limit: parse_var(&lookup, "STUDENTS_JSON_LIMIT")?.unwrap_or(defaults.json_limit),
            workers: parse_var(&lookup, "STUDENTS_WORKERS")?,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// JSON extractor settings: body size limit and a `{"detail": ...}` error body.
    pub fn json_config(&self) -> web::JsonConfig {
        web::JsonConfig::default()
            .limit(self.json_limit)
            .error_handler(json_error_handler)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    ApiError::BadRequest(format!("JSON parse error - {}", err)).into()
}
