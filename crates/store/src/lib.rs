//! Persistence seams for the commerce core.
//!
//! Repository traits give the orchestration layer point lookups and
//! listings per entity; all writes flow through the [`UnitOfWork`] as one
//! [`ChangeSet`] so an operation's changes commit together or not at all.
//! [`InMemoryStore`] implements everything with version-checked writes and
//! is the test double for the real database.

mod changeset;
mod error;
mod memory;
mod repository;

pub use changeset::{ChangeSet, CustomerChange, OrderChange, ProductChange};
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use repository::{CustomerStore, OrderStore, Page, Paged, ProductStore, UnitOfWork};

/// Convenience result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
