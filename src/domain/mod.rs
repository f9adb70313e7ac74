//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;

pub use builder::{CategoryNode, Forest, ForestBuilder};
pub use entities::*;
pub use error::DomainError;
