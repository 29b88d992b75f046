//! Orchestration layer for the commerce core.
//!
//! Command handlers sequence cross-entity operations: load entities through
//! the repository traits, invoke domain operations, and commit every change
//! of one operation through the unit of work so stock movements and order
//! state always land together. Side effects (confirmation email, event
//! publication) run only after a successful commit and never roll it back.

pub mod customers;
pub mod error;
pub mod orders;
pub mod products;
pub mod services;

pub use customers::{CreateCustomer, CustomerHandler, DeleteCustomer, UpdateCustomer};
pub use error::AppError;
pub use orders::{CancelOrder, CreateOrder, OrderHandler, OrderLine, UpdateOrderStatus};
pub use products::{
    CreateProduct, DeleteProduct, ProductHandler, UpdateProduct, UpdateProductStock,
};
pub use services::{
    EventPublisher, LoggingEventBus, LoggingNotifier, Notifier, NotifyError, PublishError,
    RecordingEventBus, RecordingNotifier,
};
