//! Persistent document storage using RocksDB.
//!
//! Documents are JSON values keyed `"{collection}:{id}"`; listing a
//! collection is a prefix iteration. Writes can merge: the stored
//! document is loaded and the written top-level fields overlay it,
//! which is how profile saves avoid clobbering credential fields.

use crate::error::Result;
use rocksdb::{Options, DB};
use serde_json::Value;
use std::path::Path;

/// Document store for academy data.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    /// Get a document by collection and id.
    pub fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let key = format!("{}:{}", collection, id);
        match self.db.get(key.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    /// Write a document.
    ///
    /// With `merge` set, the stored document is loaded first and the
    /// written top-level fields overlay it; fields absent from `doc`
    /// keep their stored values. Without `merge` the document is
    /// replaced wholesale.
    pub fn set_document(&self, collection: &str, id: &str, doc: &Value, merge: bool) -> Result<()> {
        let key = format!("{}:{}", collection, id);
        let value = if merge {
            match self.get_document(collection, id)? {
                Some(mut stored) => {
                    merge_fields(&mut stored, doc);
                    serde_json::to_vec(&stored)?
                }
                None => serde_json::to_vec(doc)?,
            }
        } else {
            serde_json::to_vec(doc)?
        };
        self.db.put(key.as_bytes(), value)?;
        Ok(())
    }

    /// List all documents in a collection.
    pub fn list_documents(&self, collection: &str) -> Result<Vec<Value>> {
        let prefix = format!("{}:", collection);
        let mut documents = Vec::new();

        let iter = self.db.prefix_iterator(prefix.as_bytes());
        for item in iter {
            let (key, value) = item?;
            if key.starts_with(prefix.as_bytes()) {
                let doc: Value = serde_json::from_slice(&value)?;
                documents.push(doc);
            } else {
                break;
            }
        }

        Ok(documents)
    }

    /// Delete a document.
    pub fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let key = format!("{}:{}", collection, id);
        self.db.delete(key.as_bytes())?;
        Ok(())
    }
}

/// Overlay the top-level fields of `patch` onto `stored`.
fn merge_fields(stored: &mut Value, patch: &Value) {
    match (stored, patch) {
        (Value::Object(stored), Value::Object(patch)) => {
            for (field, value) in patch {
                stored.insert(field.clone(), value.clone());
            }
        }
        // Non-object on either side: the write wins outright.
        (stored, patch) => *stored = patch.clone(),
    }
}
