//! Infrastructure layer: storage implementations and DI container
//!
//! This layer implements the storage boundary trait and wires up services.

pub mod di;
pub mod error;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::CategoryStore;
