use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The most recent decline. Each decline overwrites the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclineRecord {
    /// Version code that was declined, `0` when nothing was ever declined.
    pub version: i64,
    pub timestamp: DateTime<Utc>,
}

impl DeclineRecord {
    pub fn new(version: i64, timestamp: DateTime<Utc>) -> Self {
        Self { version, timestamp }
    }

    /// True for the "nothing ever declined" record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for DeclineRecord {
    fn default() -> Self {
        Self {
            version: 0,
            // The Unix epoch.
            timestamp: DateTime::<Utc>::default(),
        }
    }
}
