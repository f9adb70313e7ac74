//! Storage boundary traits
//!
//! The hierarchy engine only talks to storage through [`CategoryStore`], so
//! services can run against the in-memory store in tests and the JSON file
//! store in the CLI.

use crate::domain::{Category, CategoryFields, CategoryId, NewRecord, ParentFilter};
use crate::infrastructure::error::StoreResult;

/// Durable keyed storage for category records.
///
/// Every call must finish within the store's configured lock timeout and
/// report [`StoreError::Timeout`](crate::infrastructure::StoreError::Timeout)
/// otherwise. `update_many` must be atomic for the set of records it touches:
/// concurrent readers see either none or all of its changes.
pub trait CategoryStore: Send + Sync {
    /// Point lookup.
    fn find_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>>;

    /// Full scan in insertion order.
    fn find_all(&self) -> StoreResult<Vec<Category>>;

    /// Insert a record; the store assigns the id.
    fn insert(&self, record: NewRecord) -> StoreResult<Category>;

    /// Apply `fields` to one record. Returns `None` if the id is unknown.
    fn update(&self, id: &CategoryId, fields: CategoryFields) -> StoreResult<Option<Category>>;

    /// Apply `fields` to every record matching `filter`. Returns the match count.
    fn update_many(&self, filter: &ParentFilter, fields: CategoryFields) -> StoreResult<usize>;

    /// Remove one record. Returns `false` if the id is unknown.
    fn delete_one(&self, id: &CategoryId) -> StoreResult<bool>;
}
