//! Conversion between JSON payloads and student records.
//!
//! Incoming payloads are checked field by field against an explicit field list.
//! Every problem is collected so a single `400` response reports all of them.
//! Values are never coerced: `"7"` is not an integer and `7` is not a string.

use common::model::student::{Student, StudentFields, StudentPatch};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const NAME_MAX_LENGTH: usize = 100;
pub const GENDER_MAX_LENGTH: usize = 50;

const NON_FIELD_ERRORS: &str = "non_field_errors";

const MSG_REQUIRED: &str = "This field is required.";
const MSG_NULL: &str = "This field may not be null.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_NOT_INTEGER: &str = "A valid integer is required.";

/// Per-field validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Every field must be present.
    Full,
    /// Absent fields are left unchanged.
    Partial,
}

/// Validates a create or full-update payload.
pub fn deserialize(payload: &Value) -> Result<StudentFields, ValidationErrors> {
    let object = as_object(payload)?;
    let mut errors = ValidationErrors::default();
    let name = text_field(object, "name", Some(NAME_MAX_LENGTH), Mode::Full, &mut errors);
    let address = text_field(object, "address", None, Mode::Full, &mut errors);
    let gender = text_field(object, "gender", Some(GENDER_MAX_LENGTH), Mode::Full, &mut errors);
    let rollnumber = integer_field(object, "rollnumber", Mode::Full, &mut errors);

    match (name, address, gender, rollnumber) {
        (Some(name), Some(address), Some(gender), Some(rollnumber)) if errors.is_empty() => {
            Ok(StudentFields {
                name,
                address,
                gender,
                rollnumber,
            })
        }
        _ => Err(errors),
    }
}

/// Validates a partial-update payload; only the supplied fields are checked.
pub fn deserialize_partial(payload: &Value) -> Result<StudentPatch, ValidationErrors> {
    let object = as_object(payload)?;
    let mut errors = ValidationErrors::default();
    let patch = StudentPatch {
        name: text_field(object, "name", Some(NAME_MAX_LENGTH), Mode::Partial, &mut errors),
        address: text_field(object, "address", None, Mode::Partial, &mut errors),
        gender: text_field(object, "gender", Some(GENDER_MAX_LENGTH), Mode::Partial, &mut errors),
        rollnumber: integer_field(object, "rollnumber", Mode::Partial, &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Renders a record as the flat wire object.
pub fn serialize(student: &Student) -> Value {
    json!({
        "id": student.id,
        "name": student.fields.name,
        "address": student.fields.address,
        "gender": student.fields.gender,
        "rollnumber": student.fields.rollnumber,
    })
}

pub fn serialize_many(students: &[Student]) -> Value {
    Value::Array(students.iter().map(serialize).collect())
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    match payload {
        Value::Object(object) => Ok(object),
        other => {
            let mut errors = ValidationErrors::default();
            errors.add(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    kind_of(other)
                ),
            );
            Err(errors)
        }
    }
}

/// Looks up `field`, recording "required" or "null" problems.
fn lookup<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    mode: Mode,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    match object.get(field) {
        None => {
            if mode == Mode::Full {
                errors.add(field, MSG_REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(field, MSG_NULL);
            None
        }
        Some(value) => Some(value),
    }
}

fn text_field(
    object: &Map<String, Value>,
    field: &str,
    max_length: Option<usize>,
    mode: Mode,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let text = match lookup(object, field, mode, errors)? {
        Value::String(text) => text,
        _ => {
            errors.add(field, MSG_NOT_STRING);
            return None;
        }
    };

    if text.trim().is_empty() {
        errors.add(field, MSG_BLANK);
        return None;
    }
    if let Some(max) = max_length {
        if text.chars().count() > max {
            errors.add(
                field,
                format!("Ensure this field has no more than {} characters.", max),
            );
            return None;
        }
    }
    Some(text.clone())
}

fn integer_field(
    object: &Map<String, Value>,
    field: &str,
    mode: Mode,
    errors: &mut ValidationErrors,
) -> Option<i32> {
    let number = match lookup(object, field, mode, errors)? {
        Value::Number(number) => number,
        _ => {
            errors.add(field, MSG_NOT_INTEGER);
            return None;
        }
    };

    if let Some(value) = number.as_i64() {
        if value > i64::from(i32::MAX) {
            errors.add(field, too_large());
            return None;
        }
        if value < i64::from(i32::MIN) {
            errors.add(field, too_small());
            return None;
        }
        return Some(value as i32);
    }
    // Integers beyond i64 arrive as u64 or, past u64, as f64.
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value > f64::from(i32::MAX) => {
            errors.add(field, too_large())
        }
        Some(value) if value.fract() == 0.0 && value < f64::from(i32::MIN) => {
            errors.add(field, too_small())
        }
        _ => errors.add(field, MSG_NOT_INTEGER),
    }
    None
}

fn too_large() -> String {
    format!("Ensure this value is less than or equal to {}.", i32::MAX)
}

fn too_small() -> String {
    format!("Ensure this value is greater than or equal to {}.", i32::MIN)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha_payload() -> Value {
        json!({
            "name": "Asha",
            "address": "12 Lane",
            "gender": "F",
            "rollnumber": 7
        })
    }

    fn messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors.0.get(field).cloned().unwrap_or_default()
    }

    #[test]
    fn test_valid_payload_deserializes() {
        let fields = deserialize(&asha_payload()).unwrap();
        assert_eq!(fields.name, "Asha");
        assert_eq!(fields.address, "12 Lane");
        assert_eq!(fields.gender, "F");
        assert_eq!(fields.rollnumber, 7);
    }

    #[test]
    fn test_serialize_deserialize_round_trip() {
        let payload = asha_payload();
        let student = Student {
            id: 1,
            fields: deserialize(&payload).unwrap(),
        };
        let mut rendered = serialize(&student);
        rendered.as_object_mut().unwrap().remove("id");
        assert_eq!(rendered, payload);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let errors = deserialize(&json!({"name": "Bo"})).unwrap_err();
        let fields: Vec<_> = errors.0.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["address", "gender", "rollnumber"]);
        for field in fields {
            assert_eq!(messages(&errors, field), vec![MSG_REQUIRED.to_string()]);
        }
    }

    #[test]
    fn test_wrong_types_are_not_coerced() {
        let errors = deserialize(&json!({
            "name": 5,
            "address": ["12 Lane"],
            "gender": "F",
            "rollnumber": "7"
        }))
        .unwrap_err();
        assert_eq!(messages(&errors, "name"), vec![MSG_NOT_STRING.to_string()]);
        assert_eq!(messages(&errors, "address"), vec![MSG_NOT_STRING.to_string()]);
        assert_eq!(messages(&errors, "rollnumber"), vec![MSG_NOT_INTEGER.to_string()]);
        assert!(errors.0.get("gender").is_none());
    }

    #[test]
    fn test_fractional_and_boolean_rollnumbers_rejected() {
        for bad in [json!(7.5), json!(true)] {
            let mut payload = asha_payload();
            payload["rollnumber"] = bad;
            let errors = deserialize(&payload).unwrap_err();
            assert_eq!(messages(&errors, "rollnumber"), vec![MSG_NOT_INTEGER.to_string()]);
        }
    }

    #[test]
    fn test_null_and_blank_values_rejected() {
        let mut payload = asha_payload();
        payload["name"] = Value::Null;
        payload["address"] = json!("   ");
        let errors = deserialize(&payload).unwrap_err();
        assert_eq!(messages(&errors, "name"), vec![MSG_NULL.to_string()]);
        assert_eq!(messages(&errors, "address"), vec![MSG_BLANK.to_string()]);
    }

    #[test]
    fn test_length_limits() {
        let mut payload = asha_payload();
        payload["name"] = json!("x".repeat(NAME_MAX_LENGTH + 1));
        payload["gender"] = json!("g".repeat(GENDER_MAX_LENGTH + 1));
        payload["address"] = json!("a".repeat(10_000));
        let errors = deserialize(&payload).unwrap_err();
        assert_eq!(
            messages(&errors, "name"),
            vec!["Ensure this field has no more than 100 characters.".to_string()]
        );
        assert_eq!(
            messages(&errors, "gender"),
            vec!["Ensure this field has no more than 50 characters.".to_string()]
        );
        assert!(errors.0.get("address").is_none());
    }

    #[test]
    fn test_rollnumber_range() {
        let mut payload = asha_payload();
        payload["rollnumber"] = json!(i64::from(i32::MAX) + 1);
        let errors = deserialize(&payload).unwrap_err();
        assert_eq!(
            messages(&errors, "rollnumber"),
            vec!["Ensure this value is less than or equal to 2147483647.".to_string()]
        );

        payload["rollnumber"] = json!(i64::from(i32::MIN) - 1);
        let errors = deserialize(&payload).unwrap_err();
        assert_eq!(
            messages(&errors, "rollnumber"),
            vec!["Ensure this value is greater than or equal to -2147483648.".to_string()]
        );

        payload["rollnumber"] = json!(i32::MIN);
        assert_eq!(deserialize(&payload).unwrap().rollnumber, i32::MIN);
    }

    #[test]
    fn test_rollnumber_beyond_64_bits_gets_range_message() {
        let too_small: Value = serde_json::from_str(
            r#"{"name": "Asha", "address": "12 Lane", "gender": "F", "rollnumber": -99999999999999999999}"#,
        )
        .unwrap();
        let errors = deserialize(&too_small).unwrap_err();
        assert_eq!(
            messages(&errors, "rollnumber"),
            vec!["Ensure this value is greater than or equal to -2147483648.".to_string()]
        );

        let too_large: Value = serde_json::from_str(
            r#"{"name": "Asha", "address": "12 Lane", "gender": "F", "rollnumber": 99999999999999999999}"#,
        )
        .unwrap();
        let errors = deserialize(&too_large).unwrap_err();
        assert_eq!(
            messages(&errors, "rollnumber"),
            vec!["Ensure this value is less than or equal to 2147483647.".to_string()]
        );
    }

    #[test]
    fn test_non_object_payload() {
        let errors = deserialize(&json!([1, 2])).unwrap_err();
        assert_eq!(
            messages(&errors, NON_FIELD_ERRORS),
            vec!["Invalid data. Expected a dictionary, but got array.".to_string()]
        );
    }

    #[test]
    fn test_unknown_keys_and_id_ignored() {
        let mut payload = asha_payload();
        payload["id"] = json!(42);
        payload["nickname"] = json!("A");
        assert!(deserialize(&payload).is_ok());
    }

    #[test]
    fn test_partial_only_checks_supplied_fields() {
        let patch = deserialize_partial(&json!({"rollnumber": 9})).unwrap();
        assert_eq!(patch.rollnumber, Some(9));
        assert!(patch.name.is_none());

        let errors = deserialize_partial(&json!({"gender": ""})).unwrap_err();
        assert_eq!(messages(&errors, "gender"), vec![MSG_BLANK.to_string()]);
        assert!(errors.0.get("name").is_none());
    }
}
