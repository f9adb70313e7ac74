//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the storage boundary trait (CategoryStore)
//! but are themselves concrete structs, not traits.

mod category;

pub use category::{CategoryService, Operation};
