//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::CategoryId;

/// Domain errors represent business rule violations.
/// These are independent of storage concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad input shape, e.g. a missing name.
    #[error("{0}")]
    Validation(String),

    #[error("Category not found: {0}")]
    NotFound(CategoryId),
}
