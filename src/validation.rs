//! Translation of untyped request payloads into course mutations.
//!
//! All checks run before anything touches the store, so a rejected payload
//! never leaves a half-applied change behind.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::{CoursePatch, NewCourse};

const REQUIRED_FIELDS: [&str; 4] = ["course_code", "title", "instructor", "units"];

/// Validate a create payload: object shape, required keys, units coercion.
pub fn new_course_from_json(body: &Value) -> Result<NewCourse, AppError> {
    let obj = body.as_object().ok_or(AppError::MalformedBody)?;

    if !REQUIRED_FIELDS.iter().all(|field| obj.contains_key(*field)) {
        return Err(AppError::MissingFields);
    }

    let units = coerce_units(&obj["units"])?;

    Ok(NewCourse {
        course_code: string_field(&obj["course_code"]),
        title: string_field(&obj["title"]),
        instructor: string_field(&obj["instructor"]),
        units,
        description: obj.get("description").and_then(string_field),
        prerequisite: obj.get("prerequisite").and_then(string_field),
    })
}

/// Validate a partial-update payload. Only keys present in the body end up
/// set in the patch; an empty object is a valid no-op. A bad `units` value
/// rejects the whole payload.
pub fn course_patch_from_json(body: &Value) -> Result<CoursePatch, AppError> {
    let obj = body.as_object().ok_or(AppError::MalformedBody)?;

    let units = match obj.get("units") {
        Some(value) => Some(coerce_units(value)?),
        None => None,
    };

    Ok(CoursePatch {
        course_code: present_string(obj, "course_code"),
        title: present_string(obj, "title"),
        instructor: present_string(obj, "instructor"),
        units,
        description: obj.get("description").map(string_field),
        prerequisite: obj.get("prerequisite").map(string_field),
    })
}

/// Accepts JSON numbers and numeric strings (trimmed), the same inputs the
/// original service coerced with a float cast.
fn coerce_units(value: &Value) -> Result<f64, AppError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(AppError::InvalidUnits),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| AppError::InvalidUnits),
        _ => Err(AppError::InvalidUnits),
    }
}

/// Raw-value capture for string columns: strings pass through, null maps to
/// None, anything else is stored as its JSON text. Type enforcement beyond
/// that is the store's job.
fn string_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn present_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(string_field)
}
