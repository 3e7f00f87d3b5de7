//! Session record model for a repetition-tracking entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored repetition session.
///
/// `id` is assigned by the store on insertion and never changes afterwards.
/// `reps` carries no bounds; negative counts are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Row id assigned by the store.
    pub id: i64,
    /// When the session happened (UTC).
    pub date: DateTime<Utc>,
    /// Number of repetitions performed.
    pub reps: i64,
}

/// A session that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSessionRecord {
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reps: i64,
}

impl NewSessionRecord {
    /// Create an empty session dated now.
    pub fn new() -> Self {
        Self {
            date: Utc::now(),
            reps: 0,
        }
    }

    /// Set the repetition count.
    #[must_use]
    pub fn with_reps(mut self, reps: i64) -> Self {
        self.reps = reps;
        self
    }

    /// Override the session date.
    #[must_use]
    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Attach the id the store assigned.
    pub fn into_record(self, id: i64) -> SessionRecord {
        SessionRecord {
            id,
            date: self.date,
            reps: self.reps,
        }
    }
}

impl Default for NewSessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let before = Utc::now();
        let session = NewSessionRecord::new();
        let after = Utc::now();

        assert_eq!(session.reps, 0);
        assert!(session.date >= before && session.date <= after);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let before = Utc::now();
        let session: NewSessionRecord = serde_json::from_str("{}").unwrap();

        assert_eq!(session.reps, 0);
        assert!(session.date >= before);

        let session: NewSessionRecord = serde_json::from_str(r#"{"reps": 12}"#).unwrap();
        assert_eq!(session.reps, 12);
    }

    #[test]
    fn test_builder() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();
        let record = NewSessionRecord::new().with_reps(-3).at(date).into_record(9);

        assert_eq!(record.id, 9);
        assert_eq!(record.reps, -3);
        assert_eq!(record.date, date);
    }
}
