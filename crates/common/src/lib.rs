//! Shared types for the commerce core.
//!
//! Typed identifiers for each entity plus the [`Version`] counter used for
//! optimistic concurrency at the persistence boundary.

mod ids;
mod version;

pub use ids::{CustomerId, OrderId, OrderItemId, ProductId};
pub use version::Version;
