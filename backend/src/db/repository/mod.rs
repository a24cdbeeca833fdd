//! Repository trait definitions for database operations.
//!
//! - [`error`]: Error types for repository operations
//! - [`item`]: The item store contract

pub mod error;
pub mod item;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use item::ItemRepository;
