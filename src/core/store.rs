//! Store trait for record collections

use async_trait::async_trait;

use crate::core::error::AdminResult;
use crate::core::record::Record;

/// Storage abstraction over one record collection
///
/// The HTTP layer and services only talk to this trait, so a collection can be
/// backed by the in-memory mock store or by the upstream backend, and tests can
/// inject isolated fixtures.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// All records, in collection order
    async fn list(&self) -> AdminResult<Vec<T>>;

    /// Get a record by ID
    async fn get(&self, id: u64) -> AdminResult<Option<T>>;

    /// Add a record, replacing any record with the same ID
    async fn insert(&self, record: T) -> AdminResult<T>;

    /// Replace an existing record
    ///
    /// Returns `None` when no record has the record's ID.
    async fn update(&self, record: T) -> AdminResult<Option<T>>;

    /// Remove a record, returning whether it existed
    async fn delete(&self, id: u64) -> AdminResult<bool>;
}
