//! Domain error types.

use thiserror::Error;

use crate::money::Currency;
use crate::order::OrderStatus;

/// Errors that can occur during domain operations.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// A money amount would be negative.
    #[error("Amount cannot be negative: {cents}")]
    NegativeAmount { cents: i64 },

    /// A money amount would exceed the representable range.
    #[error("Amount overflow")]
    AmountOverflow,

    /// Arithmetic across two different currencies.
    #[error("Cannot combine {left} with {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// A currency code that is not three ASCII letters.
    #[error("Invalid currency code: {value}")]
    InvalidCurrency { value: String },

    /// A stock change would drive the quantity negative.
    #[error("Insufficient stock for product {name}")]
    InsufficientStock { name: String },

    /// A stock change would exceed the maximum representable quantity.
    #[error("Stock overflow for product {name}")]
    StockOverflow { name: String },

    /// Quantity must be greater than zero.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// A required text field was empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A malformed email address.
    #[error("Invalid email address: {value}")]
    InvalidEmail { value: String },

    /// An operation attempted against a terminal order status.
    #[error("Cannot {action} order in {status} status")]
    TerminalStatus {
        status: OrderStatus,
        action: &'static str,
    },

    /// A status change that skips the transition lattice.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Coarse classification of a [`DomainError`], used by callers that map
/// failures onto outcome categories rather than individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input to a constructor or operation.
    InvalidArgument,
    /// A stock decrement would go negative.
    InsufficientStock,
    /// Arithmetic across incompatible currencies.
    CurrencyMismatch,
    /// An operation against a terminal or disallowed order status.
    InvalidState,
}

impl DomainError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NegativeAmount { .. }
            | DomainError::AmountOverflow
            | DomainError::InvalidCurrency { .. }
            | DomainError::InvalidQuantity { .. }
            | DomainError::StockOverflow { .. }
            | DomainError::MissingField { .. }
            | DomainError::InvalidEmail { .. } => ErrorKind::InvalidArgument,
            DomainError::CurrencyMismatch { .. } => ErrorKind::CurrencyMismatch,
            DomainError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            DomainError::TerminalStatus { .. } | DomainError::InvalidTransition { .. } => {
                ErrorKind::InvalidState
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            DomainError::NegativeAmount { cents: -1 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            DomainError::InsufficientStock {
                name: "Widget".to_string()
            }
            .kind(),
            ErrorKind::InsufficientStock
        );
        assert_eq!(
            DomainError::CurrencyMismatch {
                left: Currency::USD,
                right: Currency::EUR
            }
            .kind(),
            ErrorKind::CurrencyMismatch
        );
        assert_eq!(
            DomainError::TerminalStatus {
                status: OrderStatus::Delivered,
                action: "cancel"
            }
            .kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn display_messages() {
        let err = DomainError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition from Pending to Delivered"
        );
    }
}
