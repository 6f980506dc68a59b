//! # Image List Normalization
//!
//! The backend is inconsistent about gallery fields: sometimes a native
//! JSON array of URLs, sometimes a JSON-encoded string, sometimes that
//! string with escaped slashes. Normalization accepts all three and
//! always produces an ordered `Vec<String>`. A string that is present
//! but does not parse as a JSON array of strings is a deserialization
//! error, not an empty default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an image-list field in any of its observed wire shapes.
/// Use together with `#[serde(default)]` so an absent field reads as an
/// empty gallery.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    normalize(value).map_err(serde::de::Error::custom)
}

fn normalize(value: Value) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(url) => Ok(url),
                other => Err(format!("gallery entry is not a string: {other}")),
            })
            .collect(),
        Value::String(text) if text.trim().is_empty() => Ok(Vec::new()),
        Value::String(text) => {
            // Mirror of the backend's escaped-slash variant.
            let cleaned = text.replace("\\/", "/");
            serde_json::from_str::<Vec<String>>(&cleaned).map_err(|err| {
                format!("gallery string is not a JSON array of strings: {err}")
            })
        }
        other => Err(format!("unsupported gallery representation: {other}")),
    }
}
