//! Tracker model types.
//!
//! A `Tracker` is a named counter of logged events. Its event list is
//! append-only and keeps insertion order; on disk it is an array of
//! epoch-millisecond timestamps, the format documents from earlier versions
//! of the app already use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named tracker and its logged events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    /// Stable identifier. Documents from older versions may lack one; a
    /// fresh id is assigned on load and persisted with the next mutation.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(with = "event_millis", default)]
    pub events: Vec<DateTime<Utc>>,
}

impl Tracker {
    /// Create a tracker with the given name and no events.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            events: Vec::new(),
        }
    }

    /// The most recently *recorded* event: the last element of the list.
    ///
    /// Events keep insertion order, so after logging an event nudged into the
    /// past this is not necessarily the maximum timestamp.
    pub fn latest_event(&self) -> Option<DateTime<Utc>> {
        self.events.last().copied()
    }

    /// Number of logged events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// (De)serialize event timestamps as arrays of epoch milliseconds.
mod event_millis {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(events: &[DateTime<Utc>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<i64> = events.iter().map(|e| e.timestamp_millis()).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Vec::<i64>::deserialize(deserializer)?;
        millis
            .into_iter()
            .map(|ms| {
                Utc.timestamp_millis_opt(ms)
                    .single()
                    .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}")))
            })
            .collect()
    }
}
