//! Common types shared across the Auth0 APIs.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Schemaless JSON document such as `app_metadata` or `user_metadata`.
///
/// Keys keep their insertion order and values pass through untouched; the
/// client never interprets them.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A timestamp as reported by the service.
///
/// Depending on the endpoint and API version the same field arrives either as
/// an ISO-8601 string or as a numeric epoch value, so both are accepted and
/// preserved as received. Numbers that do not fit an `i64` are kept as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Numeric epoch value (seconds, or milliseconds for large values).
    Epoch(i64),
    /// Textual timestamp, normally RFC 3339.
    Text(String),
}

impl Timestamp {
    /// Values above this are taken to be epoch milliseconds.
    const MILLIS_THRESHOLD: i64 = 100_000_000_000;

    /// Converts to a UTC datetime when the value is recognisable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Epoch(value) if value.abs() >= Self::MILLIS_THRESHOLD => {
                Utc.timestamp_millis_opt(*value).single()
            }
            Timestamp::Epoch(value) => Utc.timestamp_opt(*value, 0).single(),
            Timestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|| text.parse::<i64>().ok().and_then(|v| Timestamp::Epoch(v).to_datetime())),
        }
    }
}

// Decoded through `Value`: with `arbitrary_precision` an untagged enum cannot
// see buffered numbers.
impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => Ok(number
                .as_i64()
                .map_or_else(|| Timestamp::Text(number.to_string()), Timestamp::Epoch)),
            Value::String(text) => Ok(Timestamp::Text(text)),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or string timestamp, found {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Epoch(value) => write!(f, "{value}"),
            Timestamp::Text(text) => f.write_str(text),
        }
    }
}

/// Returns true if the space-delimited `scope` string contains `wanted`.
pub fn scope_contains(scope: &str, wanted: &str) -> bool {
    scope.split_whitespace().any(|s| s == wanted)
}
