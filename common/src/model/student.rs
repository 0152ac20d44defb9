use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored student record.
///
/// The content fields are flattened so the wire shape is the flat object
/// `{id, name, address, gender, rollnumber}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Primary key assigned by the store. Never reused after deletion.
    pub id: i64,
    #[serde(flatten)]
    pub fields: StudentFields,
}

/// The mutable content of a student, as accepted on create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub address: String,
    pub gender: String,
    pub rollnumber: i32,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub rollnumber: Option<i32>,
}

impl From<StudentFields> for StudentPatch {
    fn from(fields: StudentFields) -> Self {
        StudentPatch {
            name: Some(fields.name),
            address: Some(fields.address),
            gender: Some(fields.gender),
            rollnumber: Some(fields.rollnumber),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fields.name, self.fields.rollnumber)
    }
}
