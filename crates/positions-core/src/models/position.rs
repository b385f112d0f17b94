use serde::{Deserialize, Deserializer, Serialize};

/// A position record as returned by the API.
///
/// `position_id` is assigned by the server. The string fields are opaque to
/// this client; `null` or missing values decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub position_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
}

/// Body for creating or updating a position.
///
/// Deliberately has no identifier field: the id in the URL of an update is
/// the only id the client ever sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PositionInput {
    pub position_code: String,
    pub position_name: String,
    pub position_type: String,
    pub department: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
