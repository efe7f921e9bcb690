//! Tolerant field deserializers for scraped JSON.
//!
//! Source feeds are inconsistent across seasons: numbers arrive as strings,
//! booleans as 0/1, objects where scalars were expected. Each helper accepts
//! any JSON value and maps what it cannot interpret to `None` instead of
//! failing the whole document.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn value_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_i64(&value))
}

pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_bool(&value))
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

/// Deserialize `T`, falling back to `None` when the value has the wrong shape.
pub fn opt_struct<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Collapse records that carry two spellings of one key.
///
/// For each `(preferred, other)` pair present together, `other` is removed
/// unless `preferred` is null, in which case `other` takes its place. Serde
/// would otherwise reject the record as a duplicate field.
pub fn resolve_aliases<'a>(value: &'a Value, pairs: &[(&str, &str)]) -> Cow<'a, Value> {
    let Some(map) = value.as_object() else {
        return Cow::Borrowed(value);
    };
    if !pairs
        .iter()
        .any(|(a, b)| map.contains_key(*a) && map.contains_key(*b))
    {
        return Cow::Borrowed(value);
    }

    let mut map = map.clone();
    for (preferred, other) in pairs {
        if !(map.contains_key(*preferred) && map.contains_key(*other)) {
            continue;
        }
        if map.get(*preferred).is_some_and(Value::is_null) {
            map.remove(*preferred);
        } else {
            map.remove(*other);
        }
    }
    Cow::Owned(Value::Object(map))
}
