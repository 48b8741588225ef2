//! Lenient serde helpers for AI-produced JSON.
//!
//! The conversion collaborator guarantees the five top-level resume keys
//! exist, but nothing about the shapes underneath them. These helpers accept
//! whatever the model actually returned and degrade malformed pieces to
//! absent/empty instead of failing the whole record.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a scalar to its display form. Objects, arrays and null yield
/// `None` — nested structure never leaks into a string field.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// An optional string field. Non-scalar or blank values deserialize to `None`.
pub(crate) fn opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(scalar_to_string(&value).filter(|s| !s.trim().is_empty()))
}

/// A required-but-untrusted string field. Non-scalar values deserialize to
/// the empty string, which downstream treats as absent.
pub(crate) fn string_or_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(scalar_to_string(&value).unwrap_or_default())
}

/// A string→string map. Non-object values become the empty map; entries with
/// non-scalar or blank values are dropped.
pub(crate) fn string_map<'de, D>(de: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .iter()
        .filter_map(|(key, value)| {
            scalar_to_string(value)
                .filter(|s| !s.trim().is_empty())
                .map(|s| (key.clone(), s))
        })
        .collect())
}

/// A list of strings (scalars coerced, blanks and nested structure dropped).
pub(crate) fn string_vec<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(scalar_to_string)
        .filter(|s| !s.trim().is_empty())
        .collect())
}

/// Plain skill entries must be strings; anything else is dropped. Stricter
/// than [`string_vec`]: no scalar coercion.
pub(crate) fn skill_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Deserializes a skill item list via [`skill_strings`].
pub(crate) fn skill_list<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(skill_strings(&items))
}

/// Deserializes a sequence of entries, skipping elements that do not parse
/// as entry objects. Order of the surviving entries is preserved.
pub(crate) fn entry_vec<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(de)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
