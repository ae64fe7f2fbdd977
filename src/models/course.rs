use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// Substituted for a NULL `description` whenever a course is serialized.
pub const NO_DESCRIPTION: &str = "No description";
/// Substituted for a NULL `prerequisite` whenever a course is serialized.
pub const NO_REQUIREMENTS: &str = "No requirements";

/// A course row. `description` and `prerequisite` may be NULL in the store,
/// but serialized output always carries the defaults instead.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub course_code: String,
    pub title: String,
    pub instructor: String,
    pub units: f64,
    #[serde(serialize_with = "or_no_description")]
    pub description: Option<String>,
    #[serde(serialize_with = "or_no_requirements")]
    pub prerequisite: Option<String>,
}

fn or_no_description<S: Serializer>(value: &Option<String>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(value.as_deref().unwrap_or(NO_DESCRIPTION))
}

fn or_no_requirements<S: Serializer>(value: &Option<String>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(value.as_deref().unwrap_or(NO_REQUIREMENTS))
}

/// Validated create payload. The required string fields stay `Option` so a
/// client-supplied null reaches the store and fails its NOT NULL constraint
/// there, not in the validation layer.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_code: Option<String>,
    pub title: Option<String>,
    pub instructor: Option<String>,
    pub units: f64,
    pub description: Option<String>,
    pub prerequisite: Option<String>,
}

/// Validated partial-update payload. Fields are `None` when the key was
/// absent from the request. The nullable columns use a second `Option` so
/// an explicit null (store NULL) is distinct from an absent key (no change).
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub course_code: Option<String>,
    pub title: Option<String>,
    pub instructor: Option<String>,
    pub units: Option<f64>,
    pub description: Option<Option<String>>,
    pub prerequisite: Option<Option<String>>,
}
