//! Application error types.

use domain::DomainError;
use store::StoreError;
use thiserror::Error;

/// Errors surfaced by command handlers.
///
/// Domain and store failures keep their specific variants; callers that
/// only need the outcome category use [`AppError::public_message`], which
/// never exposes internal diagnostic detail.
#[derive(Debug, Error)]
pub enum AppError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A business-rule conflict (duplicate email, cancelling twice,
    /// deleting a customer with order history).
    #[error("{0}")]
    Conflict(String),

    /// A domain invariant was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The persistence boundary rejected the commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    /// Returns true for a not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// A message safe to show to an external caller. Store internals are
    /// replaced with a generic failure message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Store(_) => "The operation could not be completed".to_string(),
            other => other.to_string(),
        }
    }
}
