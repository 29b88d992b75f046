//! Order line items.

use common::{OrderId, OrderItemId, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::money::Money;

/// A line item within an order.
///
/// Product name and unit price are snapshots taken when the item was added,
/// so later product changes never alter historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
}

impl OrderItem {
    /// Creates a new line item snapshotting the given name and price.
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Replaces the quantity. Fails for zero.
    pub fn update_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Returns `unit_price × quantity`. Fails if the product exceeds the
    /// representable money range.
    pub fn subtotal(&self) -> Result<Money, DomainError> {
        self.unit_price.multiply(self.quantity)
    }

    pub fn id(&self) -> OrderItemId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
