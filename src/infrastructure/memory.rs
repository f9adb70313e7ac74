//! In-memory category store.

use std::time::Duration;

use parking_lot::RwLock;
use tracing::trace;

use crate::domain::{Category, CategoryFields, CategoryId, NewRecord, ParentFilter};
use crate::infrastructure::error::{StoreError, StoreResult};
use crate::infrastructure::traits::CategoryStore;

/// Default bound on lock acquisition.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Vector-backed store guarded by a single read/write lock.
///
/// Bulk updates run under one write guard, so readers never observe a
/// partially applied `update_many`.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<Vec<Category>>,
    timeout: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seed the store with existing records (kept as-is, ids included).
    pub fn with_records(records: Vec<Category>) -> Self {
        Self {
            records: RwLock::new(records),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn timeout_error(&self, operation: &'static str) -> StoreError {
        StoreError::Timeout {
            operation,
            waited_ms: self.timeout.as_millis() as u64,
        }
    }

    fn read<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Vec<Category>) -> T,
    ) -> StoreResult<T> {
        let guard = self
            .records
            .try_read_for(self.timeout)
            .ok_or_else(|| self.timeout_error(operation))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Vec<Category>) -> T,
    ) -> StoreResult<T> {
        let mut guard = self
            .records
            .try_write_for(self.timeout)
            .ok_or_else(|| self.timeout_error(operation))?;
        Ok(f(&mut guard))
    }
}

impl CategoryStore for MemoryStore {
    fn find_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        self.read("find_by_id", |records| {
            records.iter().find(|c| &c.id == id).cloned()
        })
    }

    fn find_all(&self) -> StoreResult<Vec<Category>> {
        self.read("find_all", |records| records.clone())
    }

    fn insert(&self, record: NewRecord) -> StoreResult<Category> {
        self.write("insert", |records| {
            let category = Category {
                id: CategoryId::generate(),
                name: record.name,
                parent: record.parent,
                status: record.status,
            };
            trace!(id = %category.id, "memory insert");
            records.push(category.clone());
            category
        })
    }

    fn update(&self, id: &CategoryId, fields: CategoryFields) -> StoreResult<Option<Category>> {
        self.write("update", |records| {
            records.iter_mut().find(|c| &c.id == id).map(|c| {
                c.apply(&fields);
                c.clone()
            })
        })
    }

    fn update_many(&self, filter: &ParentFilter, fields: CategoryFields) -> StoreResult<usize> {
        self.write("update_many", |records| {
            let mut count = 0;
            for category in records.iter_mut().filter(|c| filter.matches(c)) {
                category.apply(&fields);
                count += 1;
            }
            count
        })
    }

    fn delete_one(&self, id: &CategoryId) -> StoreResult<bool> {
        self.write("delete_one", |records| {
            let before = records.len();
            records.retain(|c| &c.id != id);
            records.len() != before
        })
    }
}
