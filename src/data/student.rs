use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the `students` table, serialised with its column names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
}

/// The body sent by the registration form. Missing keys end up as NULL columns.
///
/// Fields are taken as whatever JSON they arrive as and stored as text, so
/// `"course": 5` is kept as `"5"` rather than rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentForm {
    #[serde(default, deserialize_with = "coerce_to_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "coerce_to_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "coerce_to_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce_to_text")]
    pub course: Option<String>,
}

fn coerce_to_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
