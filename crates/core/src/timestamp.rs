//! Lenient serde support for backend timestamps.
//!
//! The overlay backend serializes datetimes as HTTP dates
//! (`Thu, 16 Oct 2026 10:00:00 GMT`) while other producers use RFC 3339.
//! Both are accepted; anything else deserializes to `None` instead of
//! failing the surrounding record. Values are always written as RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::types::Timestamp;

/// Parse a timestamp in RFC 3339 or RFC 2822 / HTTP-date form.
pub fn parse(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}
