//! 日期时间序列化/反序列化工具
//!
//! `modified_on` fields arrive as RFC 3339 strings, `null`, or are missing
//! entirely when a setting was never changed.
//! - 序列化: `Option<DateTime<Utc>>` -> RFC 3339 string or `null`
//! - 反序列化: RFC 3339 string / `null` / empty string -> `Option<DateTime<Utc>>`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp {s:?}: {e}"))),
        None => Ok(None),
    }
}
