//! JSON file-backed category store.
//!
//! The whole collection lives in one document:
//!
//! ```text
//! { "categories": [ { "id": "...", "name": "...", "parent": null, "status": "active" }, ... ] }
//! ```
//!
//! Every mutation loads the document, applies the change, and atomically
//! replaces the file (temp file in the same directory, then rename). A bulk
//! update therefore lands as a single file replace.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::domain::{Category, CategoryFields, CategoryId, NewRecord, ParentFilter};
use crate::infrastructure::error::{StoreError, StoreResult};
use crate::infrastructure::memory::DEFAULT_STORE_TIMEOUT;
use crate::infrastructure::traits::CategoryStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    categories: Vec<Category>,
}

/// Store persisting all categories to a single JSON file.
///
/// Access from this process is serialized by a mutex acquired with a bounded
/// wait. Other processes writing the same file are not coordinated.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
    timeout: Duration,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn locked<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce() -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self
            .lock
            .try_lock_for(self.timeout)
            .ok_or(StoreError::Timeout {
                operation,
                waited_ms: self.timeout.as_millis() as u64,
            })?;
        f()
    }

    fn load(&self) -> StoreResult<Document> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "store file missing, starting empty");
                return Ok(Document::default());
            }
            Err(e) => {
                return Err(StoreError::io(
                    format!("read {}", self.path.display()),
                    e,
                ))
            }
        };
        if content.trim().is_empty() {
            return Ok(Document::default());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, doc: &Document) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::io(format!("create {}", dir.display()), e))?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .map_err(|e| StoreError::io(format!("temp file in {}", dir.display()), e))?;
        serde_json::to_writer_pretty(&mut tmp, doc)?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(format!("write {}", tmp.path().display()), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(format!("replace {}", self.path.display()), e.error))?;

        debug!(
            path = %self.path.display(),
            count = doc.categories.len(),
            "store saved"
        );
        Ok(())
    }

    /// Load, mutate, and save only if the closure reports a change.
    fn modify<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Vec<Category>) -> (T, bool),
    ) -> StoreResult<T> {
        self.locked(operation, || {
            let mut doc = self.load()?;
            let (result, changed) = f(&mut doc.categories);
            if changed {
                self.save(&doc)?;
            }
            Ok(result)
        })
    }
}

impl CategoryStore for JsonFileStore {
    fn find_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        self.locked("find_by_id", || {
            Ok(self
                .load()?
                .categories
                .into_iter()
                .find(|c| &c.id == id))
        })
    }

    fn find_all(&self) -> StoreResult<Vec<Category>> {
        self.locked("find_all", || Ok(self.load()?.categories))
    }

    fn insert(&self, record: NewRecord) -> StoreResult<Category> {
        self.modify("insert", |categories| {
            let category = Category {
                id: CategoryId::generate(),
                name: record.name,
                parent: record.parent,
                status: record.status,
            };
            categories.push(category.clone());
            (category, true)
        })
    }

    fn update(&self, id: &CategoryId, fields: CategoryFields) -> StoreResult<Option<Category>> {
        self.modify("update", |categories| {
            match categories.iter_mut().find(|c| &c.id == id) {
                Some(c) => {
                    c.apply(&fields);
                    (Some(c.clone()), true)
                }
                None => (None, false),
            }
        })
    }

    fn update_many(&self, filter: &ParentFilter, fields: CategoryFields) -> StoreResult<usize> {
        self.modify("update_many", |categories| {
            let mut count = 0;
            for c in categories.iter_mut().filter(|c| filter.matches(c)) {
                c.apply(&fields);
                count += 1;
            }
            (count, count > 0)
        })
    }

    fn delete_one(&self, id: &CategoryId) -> StoreResult<bool> {
        self.modify("delete_one", |categories| {
            let before = categories.len();
            categories.retain(|c| &c.id != id);
            let removed = categories.len() != before;
            (removed, removed)
        })
    }
}
