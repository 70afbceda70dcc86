//! Whole-collection persistence of transaction records under a single storage key.

use std::collections::HashSet;

pub use pocketbook_domain::DEFAULT_STORAGE_KEY;
use pocketbook_domain::{CategoryCatalog, TransactionDraft, TransactionRecord};

use crate::{storage::KeyValueStore, time::Clock, CoreError};

/// Reads and rewrites the full transaction list on every mutation.
///
/// The medium offers no append primitive, so `append` is a read-modify-write of the whole
/// collection. Callers are expected to issue one mutation at a time.
pub struct TransactionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> TransactionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns every persisted record in insertion order, or an empty list when nothing has
    /// been stored yet.
    pub fn load(&self) -> Result<Vec<TransactionRecord>, CoreError> {
        match self.storage.read(&self.key)? {
            Some(payload) => {
                let records = decode_records(&payload)?;
                tracing::debug!(key = %self.key, count = records.len(), "loaded transactions");
                Ok(records)
            }
            None => {
                tracing::debug!(key = %self.key, "no transactions stored yet");
                Ok(Vec::new())
            }
        }
    }

    /// Appends `record` and writes the full list back.
    ///
    /// Re-appending a record that is already stored unchanged is a no-op, so a failed call can
    /// be retried with the same record. A different record under an existing id is rejected.
    pub fn append(&self, record: TransactionRecord) -> Result<(), CoreError> {
        let mut records = self.load()?;
        if let Some(existing) = records.iter().find(|stored| stored.id == record.id) {
            if *existing == record {
                tracing::debug!(id = %record.id, "transaction already stored");
                return Ok(());
            }
            return Err(CoreError::DuplicateTransaction(record.id));
        }
        let id = record.id;
        records.push(record);
        let payload = encode_records(&records)?;
        self.storage.write(&self.key, &payload)?;
        tracing::debug!(key = %self.key, %id, count = records.len(), "appended transaction");
        Ok(())
    }

    /// Validates a form draft, stamps it with an id and the clock's current instant, and
    /// appends it. Returns the committed record.
    pub fn register(
        &self,
        draft: &TransactionDraft,
        catalog: &CategoryCatalog,
        clock: &dyn Clock,
    ) -> Result<TransactionRecord, CoreError> {
        let record = TransactionRecord::from_draft(draft, catalog, clock.now())?;
        self.append(record.clone())?;
        tracing::info!(id = %record.id, kind = %record.kind, category = %record.category, "registered transaction");
        Ok(record)
    }

    /// Erases every record stored under the key.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.storage.remove(&self.key)?;
        tracing::debug!(key = %self.key, "cleared transactions");
        Ok(())
    }
}

/// Decodes a stored payload into validated records.
///
/// A blank payload decodes to an empty list. Any malformed row or repeated id rejects the
/// whole payload.
pub fn decode_records(payload: &str) -> Result<Vec<TransactionRecord>, CoreError> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<TransactionRecord> = serde_json::from_str(payload)
        .map_err(|err| CoreError::StorageRead(format!("undecodable transactions: {err}")))?;
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id) {
            return Err(CoreError::StorageRead(format!(
                "transaction id {} appears more than once",
                record.id
            )));
        }
    }
    Ok(records)
}

/// Serializes records in their stored order.
pub fn encode_records(records: &[TransactionRecord]) -> Result<String, CoreError> {
    serde_json::to_string(records).map_err(|err| CoreError::StorageWrite(err.to_string()))
}
