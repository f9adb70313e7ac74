//! Category hierarchy service
//!
//! Create, list, update and delete over an injected [`CategoryStore`].
//!
//! ## Mutation order
//!
//! ```text
//! update(id, status=inactive):   write target  ->  cascade to children (per parent, bulk)
//! delete(id):                    reparent children to target.parent (bulk)  ->  remove target
//! ```
//!
//! Neither sequence is transactional. A failure between the two steps leaves
//! the first step applied; repeating the call converges because both bulk
//! writes are keyed on `parent = id`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    CascadeMode, Category, CategoryFields, CategoryId, CategoryPatch, CategoryStatus,
    DeleteConfirmation, DomainError, Forest, ForestBuilder, NewCategory, NewRecord, ParentFilter,
};
use crate::infrastructure::traits::CategoryStore;

/// Engine operations as seen by the hosting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl Operation {
    /// HTTP-style status on success.
    pub fn success_code(&self) -> u16 {
        match self {
            Operation::Create => 201,
            Operation::List | Operation::Update | Operation::Delete => 200,
        }
    }
}

/// Category hierarchy service.
///
/// Holds no mutable state of its own; everything lives in the store.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    settings: Arc<Settings>,
}

impl CategoryService {
    /// Create a new category service.
    pub fn new(store: Arc<dyn CategoryStore>, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }

    /// Insert a new active category.
    ///
    /// The parent id is only checked for existence when `strict_parent` is set;
    /// otherwise a dangling parent is accepted and the record stays out of the
    /// rendered forest.
    #[instrument(level = "debug", skip_all, fields(parent = ?input.parent))]
    pub fn create(&self, input: NewCategory) -> ApplicationResult<Category> {
        let name = input.validated_name()?;

        if let Some(parent) = &input.parent {
            if self.settings.strict_parent && self.store.find_by_id(parent)?.is_none() {
                return Err(DomainError::NotFound(parent.clone()).into());
            }
        }

        let created = self.store.insert(NewRecord {
            name,
            parent: input.parent,
            status: CategoryStatus::Active,
        })?;
        info!(id = %created.id, name = %created.name, "created category");
        Ok(created)
    }

    /// Scan the store and return the whole forest.
    pub fn list(&self) -> ApplicationResult<Forest> {
        let categories = self.scan()?;
        Ok(ForestBuilder::new().build(&categories))
    }

    /// Same as [`CategoryService::list`] using the quadratic builder.
    pub fn list_naive(&self) -> ApplicationResult<Forest> {
        let categories = self.scan()?;
        Ok(ForestBuilder::build_naive(&categories))
    }

    /// Look up a single record.
    pub fn get(&self, id: &CategoryId) -> ApplicationResult<Category> {
        self.find_existing(id)
    }

    /// Rename and/or change status. Inactivation cascades to descendants
    /// according to the configured [`CascadeMode`]; activation never does.
    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub fn update(&self, id: &CategoryId, patch: CategoryPatch) -> ApplicationResult<Category> {
        let current = self.find_existing(id)?;

        let fields = CategoryFields {
            name: patch
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            parent: None,
            status: patch.status,
        };

        let updated = if fields.is_empty() {
            debug!("nothing to change");
            current
        } else {
            self.store
                .update(id, fields)?
                .ok_or_else(|| DomainError::NotFound(id.clone()))?
        };

        if patch.status == Some(CategoryStatus::Inactive) {
            let touched = self.cascade_inactive(id)?;
            debug!(touched, mode = ?self.settings.cascade, "cascaded inactivation");
        }

        Ok(updated)
    }

    /// Remove a category, first promoting its children to its own parent.
    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub fn delete(&self, id: &CategoryId) -> ApplicationResult<DeleteConfirmation> {
        let target = self.find_existing(id)?;

        let moved = self.store.update_many(
            &ParentFilter(id.clone()),
            CategoryFields::parent(target.parent.clone()),
        )?;
        debug!(moved, new_parent = ?target.parent, "reparented children");

        if !self.store.delete_one(id)? {
            // Removed by someone else after our read.
            return Err(DomainError::NotFound(id.clone()).into());
        }
        info!(name = %target.name, "deleted category");
        Ok(DeleteConfirmation::new(id.clone()))
    }

    fn find_existing(&self, id: &CategoryId) -> ApplicationResult<Category> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ApplicationError::from(DomainError::NotFound(id.clone())))
    }

    fn scan(&self) -> ApplicationResult<Vec<Category>> {
        let categories = self.store.find_all()?;
        if categories.len() > self.settings.list_soft_limit {
            warn!(
                count = categories.len(),
                soft_limit = self.settings.list_soft_limit,
                "category count exceeds soft limit, loading full set"
            );
        }
        Ok(categories)
    }

    /// Set `inactive` below `root`. Returns the number of records matched.
    ///
    /// Deep mode issues one bulk write per parent, breadth-first. Parents are
    /// taken from a scan made before the first write. The writes are not one
    /// transaction: a concurrent reader can see a level inactive while the
    /// levels below it are still active.
    fn cascade_inactive(&self, root: &CategoryId) -> ApplicationResult<usize> {
        let inactive = || CategoryFields::status(CategoryStatus::Inactive);

        match self.settings.cascade {
            CascadeMode::Shallow => Ok(self
                .store
                .update_many(&ParentFilter(root.clone()), inactive())?),
            CascadeMode::Deep => {
                let all = self.store.find_all()?;
                let mut children_of: HashMap<&CategoryId, Vec<&CategoryId>> = HashMap::new();
                for c in &all {
                    if let Some(parent) = &c.parent {
                        children_of.entry(parent).or_default().push(&c.id);
                    }
                }

                let mut touched = 0;
                let mut seen: HashSet<&CategoryId> = HashSet::from([root]);
                let mut queue: VecDeque<&CategoryId> = VecDeque::from([root]);
                while let Some(parent) = queue.pop_front() {
                    let Some(children) = children_of.get(parent) else {
                        continue;
                    };
                    touched += self
                        .store
                        .update_many(&ParentFilter(parent.clone()), inactive())?;
                    queue.extend(children.iter().copied().filter(|c| seen.insert(*c)));
                }
                Ok(touched)
            }
        }
    }
}
