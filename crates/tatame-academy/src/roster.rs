//! Roster - student record persistence and queries.
//!
//! Reads swallow storage errors: a failed fetch logs a warning and comes
//! back as "no data", so a flaky store degrades to an empty roster
//! instead of a hard failure. Writes propagate errors, so attendance and
//! profile changes are never silently lost.

use crate::error::Result;
use crate::models::{StudentRecord, UserAccount};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Student roster backed by the document store.
pub struct Roster {
    storage: Arc<Storage>,
}

impl Roster {
    /// Create a roster over the shared storage.
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Fetch a student by uid. Absent and unreadable both come back as
    /// `None`; read errors are logged, not propagated.
    pub fn get_by_id(&self, uid: &str) -> Option<StudentRecord> {
        match self.storage.get_document(StudentRecord::COLLECTION, uid) {
            Ok(Some(doc)) => match serde_json::from_value(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Unreadable student document {}: {}", uid, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to fetch student {}: {}", uid, e);
                None
            }
        }
    }

    /// List every student. A read error comes back as an empty roster;
    /// a single unreadable document is skipped, not fatal.
    pub fn list_all(&self) -> Vec<StudentRecord> {
        let docs = match self.storage.list_documents(StudentRecord::COLLECTION) {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!("Failed to list students: {}", e);
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for doc in docs {
            match serde_json::from_value::<StudentRecord>(doc) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping unreadable student document: {}", e),
            }
        }
        records
    }

    /// Students whose next degree is within reach: more than zero
    /// presences away, but no more than `threshold`.
    ///
    /// Zero needed means already eligible, which is "ready" rather than
    /// "close"; those records are excluded.
    pub fn list_close_to_graduation(&self, threshold: u64) -> Vec<StudentRecord> {
        self.list_all()
            .into_iter()
            .filter(|record| {
                let needed = record.presences_for_next_degree();
                needed > 0 && needed <= threshold
            })
            .collect()
    }

    /// Record one attendance for the student and persist it.
    ///
    /// The in-memory mutation happens before the write; when the write
    /// fails the error propagates while the mutation stands, so retrying
    /// can record the same class twice. At-least-once, not exactly-once.
    pub fn record_attendance(
        &self,
        record: &mut StudentRecord,
        date: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let date = date.unwrap_or_else(Utc::now);
        record.record_presence(date);

        let doc = serde_json::to_value(&record)?;
        self.storage
            .set_document(StudentRecord::COLLECTION, &record.uid, &doc, true)
    }

    /// Persist the student record, mirroring the profile fields into the
    /// users document. Both writes merge, so account credentials survive
    /// a profile save.
    pub fn save(&self, record: &StudentRecord) -> Result<()> {
        let profile = serde_json::json!({
            "uid": record.uid,
            "email": record.email,
            "name": record.name,
            "belt": record.belt,
            "age": record.age,
            "address": record.address,
            "education": record.education,
            "degrees": record.degrees,
        });
        self.storage
            .set_document(UserAccount::COLLECTION, &record.uid, &profile, true)?;

        let doc = serde_json::to_value(record)?;
        self.storage
            .set_document(StudentRecord::COLLECTION, &record.uid, &doc, true)
    }
}
