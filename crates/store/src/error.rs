//! Store error types.

use common::Version;
use thiserror::Error;

/// Errors raised at the persistence boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// An update or delete referenced an entity that is not stored.
    #[error("{entity} with id {id} does not exist")]
    MissingEntity { entity: &'static str, id: String },

    /// An insert collided with an already-stored entity.
    #[error("{entity} with id {id} already exists")]
    DuplicateEntity { entity: &'static str, id: String },

    /// The entity changed since it was loaded; the commit was rejected
    /// without applying anything.
    #[error("version conflict on {entity} {id}: expected {expected}, stored {actual}")]
    VersionConflict {
        entity: &'static str,
        id: String,
        expected: Version,
        actual: Version,
    },
}
