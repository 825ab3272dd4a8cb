//! In-memory implementation of RecordStore for mock mode and tests

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::core::error::{AdminError, AdminResult};
use crate::core::record::Record;
use crate::core::store::RecordStore;

/// In-memory record store
///
/// Keeps records in insertion order so list results are deterministic.
/// Cloned handles share the same collection; mutations are visible to every
/// handle for the lifetime of the process.
pub struct InMemoryStore<T: Record> {
    records: Arc<RwLock<IndexMap<u64, T>>>,
}

impl<T: Record> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Record> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a store holding `records`, in iteration order
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id(), record))
            .collect::<IndexMap<_, _>>();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    fn read(&self) -> AdminResult<std::sync::RwLockReadGuard<'_, IndexMap<u64, T>>> {
        self.records
            .read()
            .map_err(|e| AdminError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> AdminResult<std::sync::RwLockWriteGuard<'_, IndexMap<u64, T>>> {
        self.records
            .write()
            .map_err(|e| AdminError::Internal(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    async fn list(&self) -> AdminResult<Vec<T>> {
        let records = self.read()?;
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> AdminResult<Option<T>> {
        let records = self.read()?;
        Ok(records.get(&id).cloned())
    }

    async fn insert(&self, record: T) -> AdminResult<T> {
        let mut records = self.write()?;
        records.insert(record.id(), record.clone());
        tracing::debug!(resource = T::resource_name(), id = record.id(), "inserted record");
        Ok(record)
    }

    async fn update(&self, record: T) -> AdminResult<Option<T>> {
        let mut records = self.write()?;
        match records.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: u64) -> AdminResult<bool> {
        let mut records = self.write()?;
        // shift_remove keeps the order of the remaining records
        let removed = records.shift_remove(&id).is_some();
        if removed {
            tracing::debug!(resource = T::resource_name(), id, "deleted record");
        }
        Ok(removed)
    }
}
