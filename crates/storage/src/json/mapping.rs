//! Conversion between question-bank JSON documents and `QuestionRecord`s.

use log::warn;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::repository::{QuestionRecord, StorageError};

/// Parse a question-bank document.
///
/// The document must be a JSON array. Elements that do not have the record
/// shape are skipped with a warning so one broken row does not hide the rest.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the text is not JSON or not an array.
pub(crate) fn parse_document(source: &str, raw: &str) -> Result<Vec<QuestionRecord>, StorageError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| StorageError::Malformed(format!("{source}: {e}")))?;
    let Value::Array(rows) = value else {
        return Err(StorageError::Malformed(format!(
            "{source}: expected a JSON array of questions"
        )));
    };

    let mut records = Vec::with_capacity(rows.len());
    for (row, item) in rows.into_iter().enumerate() {
        match serde_json::from_value::<QuestionRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("{source}: skipping row {row}: {e}"),
        }
    }
    Ok(records)
}

/// Render records as a pretty-printed document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub(crate) fn render_document(records: &[QuestionRecord]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(records).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Deserialize an answer index, accepting integral floats such as `1.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn integral_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(index) = value.as_i64() {
        return Ok(index);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!(
            "correct must be an integer, got {value}"
        ))),
    }
}

/// Keep an explicit `null` distinct from a missing field.
///
/// Pair with `#[serde(default)]`: absent gives `None`, `null` gives `Some(Value::Null)`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
