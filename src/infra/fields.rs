//! Serde helpers for the loosely typed fields shared by both codecs.
//!
//! Hand-edited documents and API payloads write ids and timestamps as
//! integers, numeric strings or blanks. These helpers accept all of them
//! and write back one canonical form per codec.

use crate::domain::{DraftId, NoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Any scalar a document may hold where an id or timestamp is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    // Integers past i64::MAX; tried before Float so they are not rounded
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::UInt(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Treats an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod draft_id {
    use super::*;

    /// Never fails: anything that is not an integer or id text is kept as
    /// [`DraftId::Corrupt`] for the store to reject. Floats and booleans
    /// count as corrupt even when they hold a whole number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DraftId, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawScalar>::deserialize(deserializer)? {
            None => DraftId::Unassigned,
            Some(RawScalar::Int(n)) => DraftId::from_integer(n),
            Some(RawScalar::UInt(n)) => DraftId::Assigned(NoteId::new(n)),
            Some(RawScalar::Text(s)) => DraftId::parse(&s),
            Some(other) => DraftId::Corrupt(other.into_text()),
        })
    }

    /// Writes an unassigned id as an empty string, leaving a visible slot
    /// in edited documents.
    pub fn serialize_blank<S: Serializer>(id: &DraftId, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            DraftId::Unassigned => serializer.serialize_str(""),
            DraftId::Assigned(id) => serializer.serialize_u64(id.get()),
            DraftId::Corrupt(raw) => serializer.serialize_str(raw),
        }
    }

    /// Writes an unassigned id as `null`.
    pub fn serialize_null<S: Serializer>(id: &DraftId, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            DraftId::Unassigned => serializer.serialize_none(),
            other => serialize_blank(other, serializer),
        }
    }
}

/// Unix timestamps in whole seconds.
pub mod timestamp {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = match Option::<RawScalar>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(RawScalar::Int(n)) => n,
            Some(RawScalar::UInt(n)) => {
                return Err(D::Error::custom(format!("timestamp {n} out of range")));
            }
            Some(RawScalar::Text(s)) if s.trim().is_empty() => return Ok(None),
            Some(RawScalar::Text(s)) => s.trim().parse().map_err(|_| {
                D::Error::custom(format!("invalid timestamp '{s}': expected Unix seconds"))
            })?,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "invalid timestamp '{}': expected Unix seconds",
                    other.into_text()
                )));
            }
        };
        DateTime::from_timestamp(secs, 0)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp {secs} out of range")))
    }

    pub fn serialize_blank<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_i64(ts.timestamp()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn serialize_null<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_i64(ts.timestamp()),
            None => serializer.serialize_none(),
        }
    }
}
