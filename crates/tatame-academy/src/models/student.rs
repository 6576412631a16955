//! Student record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student's profile and attendance state.
///
/// Stored as one document in the `students` collection, keyed by `uid`.
/// Every field is defaulted so partial documents still deserialize:
/// missing numbers become 0, missing strings empty, missing history an
/// empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    /// Account id, issued by the user directory
    #[serde(default)]
    pub uid: String,

    /// Full name
    #[serde(default)]
    pub name: String,

    /// Contact email, doubles as the login identifier
    #[serde(default)]
    pub email: String,

    /// Current belt label, lowercase ("white", "grey", "blue", ...)
    #[serde(default)]
    pub belt: String,

    /// Age in years
    #[serde(default)]
    pub age: i64,

    /// Postal address, may be empty
    #[serde(default)]
    pub address: String,

    /// Education level, free text
    #[serde(default)]
    pub education: String,

    /// Degrees (stripes) earned on the current belt
    #[serde(default)]
    pub degrees: i64,

    /// Lifetime attendance count
    #[serde(default)]
    pub total_presences: i64,

    /// When the student last attended a class
    #[serde(default)]
    pub last_presence_date: Option<DateTime<Utc>>,

    /// Every recorded attendance, append-only
    #[serde(default)]
    pub history_presences: Vec<DateTime<Utc>>,
}

impl StudentRecord {
    /// Collection name in the document store.
    pub const COLLECTION: &'static str = "students";

    /// Create a new record with zero attendance state.
    pub fn new(uid: String, name: String, email: String, belt: String, age: i64) -> Self {
        Self {
            uid,
            name,
            email,
            belt,
            age,
            address: String::new(),
            education: String::new(),
            degrees: 0,
            total_presences: 0,
            last_presence_date: None,
            history_presences: Vec::new(),
        }
    }

    /// Presences still needed before the next degree or belt.
    ///
    /// Computed from the current fields on every call, never stored.
    pub fn presences_for_next_degree(&self) -> u64 {
        tatame_grading::presences_needed(self.age, &self.belt, self.degrees, self.total_presences)
    }

    /// Apply one attendance: bump the counter, set the last date, append
    /// to the history. Persistence is the roster's job.
    pub fn record_presence(&mut self, date: DateTime<Utc>) {
        self.total_presences += 1;
        self.last_presence_date = Some(date);
        self.history_presences.push(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> StudentRecord {
        StudentRecord::new(
            "uid-1".to_string(),
            "Ana Souza".to_string(),
            "ana@example.com".to_string(),
            "white".to_string(),
            21,
        )
    }

    #[test]
    fn new_record_has_zero_attendance() {
        let record = sample();
        assert_eq!(record.total_presences, 0);
        assert_eq!(record.last_presence_date, None);
        assert!(record.history_presences.is_empty());
        assert_eq!(record.degrees, 0);
        assert_eq!(record.address, "");
    }

    #[test]
    fn record_presence_keeps_count_and_history_in_step() {
        let mut record = sample();
        let mut last = None;

        for day in 1..=5 {
            let date = Utc.with_ymd_and_hms(2024, 3, day, 19, 0, 0).unwrap();
            record.record_presence(date);
            last = Some(date);
        }

        assert_eq!(record.total_presences, 5);
        assert_eq!(record.history_presences.len(), 5);
        assert_eq!(record.last_presence_date, last);
        assert_eq!(record.history_presences.last().copied(), last);
    }

    #[test]
    fn presences_for_next_degree_tracks_attendance() {
        let mut record = sample();
        assert_eq!(record.presences_for_next_degree(), 50);

        let date = Utc.with_ymd_and_hms(2024, 3, 1, 19, 0, 0).unwrap();
        record.record_presence(date);
        assert_eq!(record.presences_for_next_degree(), 49);
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let record: StudentRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.uid, "");
        assert_eq!(record.age, 0);
        assert_eq!(record.total_presences, 0);
        assert_eq!(record.last_presence_date, None);
        assert!(record.history_presences.is_empty());
    }

    #[test]
    fn partial_document_keeps_given_fields() {
        let record: StudentRecord =
            serde_json::from_str(r#"{"uid": "x1", "name": "Bia", "age": 9}"#).unwrap();
        assert_eq!(record.uid, "x1");
        assert_eq!(record.name, "Bia");
        assert_eq!(record.age, 9);
        assert_eq!(record.belt, "");
    }

    #[test]
    fn serialize_deserialize() {
        let mut record = sample();
        record.record_presence(Utc.with_ymd_and_hms(2024, 3, 1, 19, 0, 0).unwrap());

        let json = serde_json::to_string(&record).unwrap();
        let parsed: StudentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
