//! Order aggregate and related types.

mod aggregate;
mod events;
mod item;
mod status;

pub use aggregate::Order;
pub use events::{OrderCompletedData, OrderCreatedData, OrderEvent};
pub use item::OrderItem;
pub use status::OrderStatus;
