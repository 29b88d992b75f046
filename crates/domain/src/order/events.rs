//! Order domain events.
//!
//! Events are plain values returned by domain operations; the orchestration
//! layer decides what to do with them after a successful commit. Entities
//! never hold an event buffer.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

/// Facts emitted by order operations for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// An order was created.
    OrderCreated(OrderCreatedData),

    /// An order reached the Delivered status.
    OrderCompleted(OrderCompletedData),
}

impl OrderEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "OrderCreated",
            OrderEvent::OrderCompleted(_) => "OrderCompleted",
        }
    }
}

/// Data for the OrderCreated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedData {
    /// The new order.
    pub order_id: OrderId,

    /// Human-facing order number.
    pub order_number: String,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// Data for the OrderCompleted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCompletedData {
    /// The completed order.
    pub order_id: OrderId,

    /// Human-facing order number.
    pub order_number: String,

    /// When the order was delivered.
    pub completed_at: DateTime<Utc>,
}
