//! Tolerant field decoders for handshake context.
//!
//! Only `host` decides whether a handshake is usable. Everything else the host attaches is
//! best-effort: a malformed field falls back to its default and a malformed list entry is
//! skipped, so a host running a newer or sloppier build still establishes trust.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use tracing::trace;

/// Decode `T`, or fall back to `T::default()` when the value has the wrong shape.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        trace!(error = %e, "ignoring malformed handshake field");
        T::default()
    }))
}

/// Decode a list, dropping entries that do not decode as `T`. A non-list yields an empty list.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        trace!("ignoring non-list handshake field");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            T::deserialize(item)
                .map_err(|e| trace!(error = %e, "skipping malformed handshake entry"))
                .ok()
        })
        .collect())
}

/// Unix seconds from any JSON number; fractional seconds are truncated.
pub(crate) fn unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = Number::deserialize(deserializer)?;
    n.as_i64()
        .or_else(|| n.as_f64().map(|secs| secs as i64))
        .ok_or_else(|| D::Error::custom(format!("invalid unix timestamp {n}")))
}
