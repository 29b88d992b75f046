//! Domain event publication seam.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::OrderEvent;
use thiserror::Error;

/// A publish attempt that did not go through. Publication is best-effort;
/// handlers log this error and keep the committed result.
#[derive(Debug, Clone, Error)]
#[error("event publication failed: {0}")]
pub struct PublishError(pub String);

/// Broadcasts domain events for downstream consumers.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event.
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError>;
}

/// Publisher that only logs. Stands in for a real message broker.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventBus;

impl LoggingEventBus {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventBus {
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError> {
        tracing::info!(event_type = event.event_type(), "publishing domain event");
        Ok(())
    }
}

/// In-memory publisher for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventBus {
    events: Arc<RwLock<Vec<OrderEvent>>>,
}

impl RecordingEventBus {
    /// Creates a new recording event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published events.
    pub fn published(&self) -> Vec<OrderEvent> {
        self.events.read().unwrap().clone()
    }

    /// Returns the event type names in publication order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .read()
            .unwrap()
            .iter()
            .map(OrderEvent::event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventBus {
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError> {
        self.events.write().unwrap().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{CustomerId, OrderId};
    use domain::OrderCreatedData;

    #[tokio::test]
    async fn recording_bus_captures_events() {
        let bus = RecordingEventBus::new();
        bus.publish(OrderEvent::OrderCreated(OrderCreatedData {
            order_id: OrderId::new(),
            order_number: "ORD-20260830-AB12CD34".to_string(),
            customer_id: CustomerId::new(),
            created_at: Utc::now(),
        }))
        .await
        .unwrap();

        assert_eq!(bus.event_types(), vec!["OrderCreated"]);
    }
}
