//! Fixed response bodies returned by the write endpoints.

use serde::{Deserialize, Serialize};

pub const STUDENT_CREATED: &str = "Student Created successfully.";
pub const STUDENT_UPDATED: &str = "Student Updated successfully.";
pub const STUDENT_DELETED: &str = "Student Deleted successfully.";

/// `{"message": "..."}` body sent after a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// `{"detail": "..."}` body used for non-field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        DetailResponse {
            detail: detail.into(),
        }
    }
}
