//! Domain model for the commerce core.
//!
//! This crate holds the order lifecycle and inventory consistency logic:
//! - [`Money`] arithmetic guarded by currency equality
//! - [`Product`] as the stock ledger with a non-negative counter
//! - [`Order`] as the aggregate root owning its line items and status
//!   transitions
//! - Domain events returned as explicit values from operations, never held
//!   as hidden entity state
//!
//! Persistence, notification, and event publication are collaborator seams
//! owned by other crates; nothing here performs I/O.

pub mod customer;
pub mod error;
pub mod money;
pub mod order;
pub mod product;
pub mod values;

pub use customer::Customer;
pub use error::{DomainError, ErrorKind};
pub use money::{Currency, Money};
pub use order::{
    Order, OrderCompletedData, OrderCreatedData, OrderEvent, OrderItem, OrderStatus,
};
pub use product::Product;
pub use values::{Address, Email, PaymentMethod};
