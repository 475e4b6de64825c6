//! Serde helpers for the store's loose JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

/// The store hands ids back as strings (`"3"`) but accepts numbers.
pub(super) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => {
            s.trim().parse().map_err(|_| de::Error::custom(format!("invalid id {s:?}")))
        }
    }
}

/// Treats an explicit `null` like a missing field.
pub(super) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Encodes a due date as the UTC-midnight ISO-8601 timestamp the store keeps.
#[must_use]
pub fn encode_due_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00.000Z").to_string()
}

/// Decodes a stored due date from a full ISO-8601 timestamp or a bare
/// `YYYY-MM-DD` date. Anything else is treated as no date at all.
#[must_use]
pub fn decode_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub(super) mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&super::encode_due_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        // Epoch numbers and other foreign shapes read as no date.
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(super::decode_due_date(&raw)),
            _ => Ok(None),
        }
    }
}

#[allow(clippy::ref_option)]
pub(super) fn patch_due_date<S: Serializer>(
    value: &Option<Option<NaiveDate>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    due_date::serialize(&value.flatten(), serializer)
}
