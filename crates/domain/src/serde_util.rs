//! Lenient deserializers for backend payloads.

use serde::Deserialize;
use serde::de::{self, DeserializeOwned, Deserializer};

/// Treats `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts an object, `null`, or a string holding a JSON object.
pub(crate) fn lenient_map<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::String(text) if text.trim().is_empty() => Ok(T::default()),
        serde_json::Value::String(text) => serde_json::from_str(&text).map_err(de::Error::custom),
        other => serde_json::from_value(other).map_err(de::Error::custom),
    }
}
