//! In-memory document store

use crate::StoreError;
use lastenboek_domain::traits::DocumentStore;
use lastenboek_domain::DocumentRecord;
use std::collections::BTreeMap;

/// DocumentStore kept in a map keyed by record id
///
/// Useful for tests and dry runs. Iteration order is by id, matching
/// [`SqliteStore`](crate::SqliteStore).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, DocumentRecord>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of upsert calls, including overwrites
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DocumentStore for MemoryStore {
    type Error = StoreError;

    fn upsert_item(&mut self, record: &DocumentRecord) -> Result<(), Self::Error> {
        if record.id.is_empty() {
            return Err(StoreError::InvalidData("record id is empty".to_string()));
        }
        self.items.insert(record.id.clone(), record.clone());
        self.writes += 1;
        Ok(())
    }

    fn get_item(&self, id: &str) -> Result<Option<DocumentRecord>, Self::Error> {
        Ok(self.items.get(id).cloned())
    }

    fn list_items(&self, limit: Option<usize>) -> Result<Vec<DocumentRecord>, Self::Error> {
        let limit = limit.unwrap_or(usize::MAX);
        Ok(self.items.values().take(limit).cloned().collect())
    }

    fn count_items(&self) -> Result<usize, Self::Error> {
        Ok(self.items.len())
    }
}
