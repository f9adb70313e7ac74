//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Store-assigned category identifier.
///
/// A plain key resolved by lookup. Parent links hold one of these, never a
/// reference to the parent record itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle state of a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Active => "active",
            CategoryStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(CategoryStatus::Active),
            "inactive" => Ok(CategoryStatus::Inactive),
            other => Err(DomainError::Validation(format!(
                "invalid status '{other}', expected 'active' or 'inactive'"
            ))),
        }
    }
}

/// A stored category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// `None` means root.
    #[serde(default)]
    pub parent: Option<CategoryId>,
    #[serde(default)]
    pub status: CategoryStatus,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_child_of(&self, id: &CategoryId) -> bool {
        self.parent.as_ref() == Some(id)
    }

    /// Apply a partial field set in place.
    pub fn apply(&mut self, fields: &CategoryFields) {
        if let Some(name) = &fields.name {
            self.name = name.clone();
        }
        if let Some(parent) = &fields.parent {
            self.parent = parent.clone();
        }
        if let Some(status) = fields.status {
            self.status = status;
        }
    }
}

/// Create input as received from the caller; not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

impl NewCategory {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent: None,
        }
    }

    pub fn child(name: impl Into<String>, parent: CategoryId) -> Self {
        Self {
            name: Some(name.into()),
            parent: Some(parent),
        }
    }

    /// Returns the trimmed name, or a validation error if it is absent or blank.
    pub fn validated_name(&self) -> Result<String, DomainError> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(DomainError::Validation("Name is required".to_string())),
        }
    }
}

/// Update input: rename and/or status change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<CategoryStatus>,
}

impl CategoryPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: None,
        }
    }

    pub fn status(status: CategoryStatus) -> Self {
        Self {
            name: None,
            status: Some(status),
        }
    }
}

/// Record as handed to the store for insertion (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub parent: Option<CategoryId>,
    pub status: CategoryStatus,
}

/// Partial field set for `update` / `update_many`.
///
/// `parent` is doubly optional: `Some(None)` resets the field to root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: Option<String>,
    pub parent: Option<Option<CategoryId>>,
    pub status: Option<CategoryStatus>,
}

impl CategoryFields {
    pub fn status(status: CategoryStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn parent(parent: Option<CategoryId>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent.is_none() && self.status.is_none()
    }
}

/// Bulk-update filter: records whose `parent` equals the given id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentFilter(pub CategoryId);

impl ParentFilter {
    pub fn matches(&self, category: &Category) -> bool {
        category.is_child_of(&self.0)
    }
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
    pub id: CategoryId,
}

impl DeleteConfirmation {
    pub fn new(id: CategoryId) -> Self {
        Self {
            message: "Category deleted".to_string(),
            id,
        }
    }
}

/// How far an inactivation propagates below the updated category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadeMode {
    /// Direct children only.
    Shallow,
    /// Every descendant, transitively.
    #[default]
    Deep,
}

impl FromStr for CascadeMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shallow" => Ok(CascadeMode::Shallow),
            "deep" => Ok(CascadeMode::Deep),
            other => Err(DomainError::Validation(format!(
                "invalid cascade mode '{other}', expected 'shallow' or 'deep'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_blank_name_when_validating_then_rejects() {
        let input = NewCategory {
            name: Some("   ".into()),
            parent: None,
        };
        assert!(matches!(
            input.validated_name(),
            Err(DomainError::Validation(msg)) if msg == "Name is required"
        ));
        assert!(NewCategory::default().validated_name().is_err());
    }

    #[test]
    fn given_status_strings_when_parsing_then_accepts_known_values() {
        assert_eq!("Inactive".parse::<CategoryStatus>().unwrap(), CategoryStatus::Inactive);
        assert_eq!("active".parse::<CategoryStatus>().unwrap(), CategoryStatus::Active);
        assert!("archived".parse::<CategoryStatus>().is_err());
    }

    #[test]
    fn given_fields_with_parent_reset_when_applying_then_becomes_root() {
        let mut cat = Category {
            id: "c".into(),
            name: "Phones".into(),
            parent: Some("p".into()),
            status: CategoryStatus::Active,
        };
        cat.apply(&CategoryFields::parent(None));
        assert!(cat.is_root());
        assert_eq!(cat.name, "Phones");
    }

    #[test]
    fn given_category_when_serializing_then_uses_lowercase_status_and_null_parent() {
        let cat = Category {
            id: "r1".into(),
            name: "Root".into(),
            parent: None,
            status: CategoryStatus::Inactive,
        };
        let json = serde_json::to_string(&cat).unwrap();
        assert_eq!(
            json,
            r#"{"id":"r1","name":"Root","parent":null,"status":"inactive"}"#
        );
    }
}
