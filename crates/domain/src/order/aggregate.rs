//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId, ProductId, Version};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::money::Money;
use crate::product::Product;
use crate::values::{Address, PaymentMethod};

use super::{
    OrderItem, OrderStatus,
    events::{OrderCompletedData, OrderCreatedData, OrderEvent},
};

/// Order aggregate root.
///
/// Owns its line items and guards the status lattice. Stock checks happen
/// here against the product's current counter, but the actual decrement is
/// a separate [`Product::update_stock`] call sequenced by the orchestration
/// layer so both land in the same commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_number: String,
    customer_id: CustomerId,
    status: OrderStatus,
    payment_method: PaymentMethod,
    shipping_address: Address,
    items: Vec<OrderItem>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: Version,
}

impl Order {
    /// Creates a new order in `Pending` status with no items.
    ///
    /// Returns the order plus the `OrderCreated` event for downstream
    /// consumers.
    pub fn create(
        customer_id: CustomerId,
        payment_method: PaymentMethod,
        shipping_address: Address,
    ) -> (Self, OrderEvent) {
        let now = Utc::now();
        let order = Self {
            id: OrderId::new(),
            order_number: generate_order_number(now),
            customer_id,
            status: OrderStatus::Pending,
            payment_method,
            shipping_address,
            items: Vec::new(),
            completed_at: None,
            created_at: now,
            updated_at: now,
            version: Version::initial(),
        };

        let event = OrderEvent::OrderCreated(OrderCreatedData {
            order_id: order.id,
            order_number: order.order_number.clone(),
            customer_id,
            created_at: now,
        });

        (order, event)
    }

    /// Adds a line for `quantity` units of `product`, snapshotting its name
    /// and price.
    ///
    /// Checks availability against the product's current stock counter; the
    /// caller must follow up with `product.update_stock(-quantity)` so the
    /// reservation is real. If the product already has a line, its quantity
    /// grows instead of a duplicate line appearing.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        if product.stock_quantity() < quantity {
            return Err(DomainError::InsufficientStock {
                name: product.name().to_string(),
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id() == product.id())
        {
            let merged = existing.quantity() + quantity;
            existing.update_quantity(merged)?;
        } else {
            self.items.push(OrderItem::new(
                self.id,
                product.id(),
                product.name(),
                product.price(),
                quantity,
            ));
        }

        self.touch();
        Ok(())
    }

    /// Returns the sum of all item subtotals, or zero-money for an empty
    /// order.
    ///
    /// Fails with [`DomainError::CurrencyMismatch`] when items carry mixed
    /// currencies and [`DomainError::AmountOverflow`] when the sum leaves
    /// the representable range; the failure propagates rather than silently
    /// picking a value.
    pub fn total_amount(&self) -> Result<Money, DomainError> {
        let mut subtotals = self.items.iter().map(|item| item.subtotal());
        let Some(first) = subtotals.next() else {
            return Ok(Money::zero());
        };
        subtotals.try_fold(first?, |total, subtotal| total.checked_add(subtotal?))
    }

    /// Moves the order to `new_status`, enforcing the transition lattice.
    ///
    /// Terminal statuses reject any change; a non-adjacent jump fails with
    /// [`DomainError::InvalidTransition`]. Reaching `Delivered` stamps
    /// `completed_at` and yields the `OrderCompleted` event.
    pub fn update_status(
        &mut self,
        new_status: OrderStatus,
    ) -> Result<Vec<OrderEvent>, DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStatus {
                status: self.status,
                action: "change status of",
            });
        }
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }

        self.status = new_status;
        self.touch();

        if new_status == OrderStatus::Delivered {
            let completed_at = Utc::now();
            self.completed_at = Some(completed_at);
            return Ok(vec![OrderEvent::OrderCompleted(OrderCompletedData {
                order_id: self.id,
                order_number: self.order_number.clone(),
                completed_at,
            })]);
        }

        Ok(vec![])
    }

    /// Cancels the order. Fails only for a delivered order; the stricter
    /// "not after shipping" rule is an orchestration concern. Does not
    /// restore stock itself.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status == OrderStatus::Delivered {
            return Err(DomainError::TerminalStatus {
                status: self.status,
                action: "cancel",
            });
        }
        self.status = OrderStatus::Cancelled;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// Returns all line items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the line for a product, if present.
    pub fn item_for(&self, product_id: ProductId) -> Option<&OrderItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

/// Builds an order number of the form `ORD-YYYYMMDD-XXXXXXXX` where the
/// suffix is eight uppercase hex characters.
fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();
    format!("ORD-{}-{}", now.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn new_order() -> Order {
        let (order, _) = Order::create(
            CustomerId::new(),
            PaymentMethod::CreditCard,
            Address::new("1 Main St", "Springfield", "IL", "62701", "USA"),
        );
        order
    }

    fn product(name: &str, price_cents: i64, stock: u32) -> Product {
        Product::new(
            name,
            "",
            Money::usd(price_cents).unwrap(),
            stock,
            "Gadgets",
        )
        .unwrap()
    }

    #[test]
    fn create_starts_pending_and_empty() {
        let (order, event) = Order::create(
            CustomerId::new(),
            PaymentMethod::Cash,
            Address::new("1 Main St", "Springfield", "IL", "62701", "USA"),
        );
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.item_count(), 0);
        assert!(order.completed_at().is_none());
        assert_eq!(event.event_type(), "OrderCreated");
    }

    #[test]
    fn order_number_format() {
        let order = new_order();
        let number = order.order_number();
        assert!(number.starts_with("ORD-"));
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn add_item_snapshots_product() {
        let mut order = new_order();
        let widget = product("Widget", 2000, 10);

        order.add_item(&widget, 2).unwrap();

        let item = order.item_for(widget.id()).unwrap();
        assert_eq!(item.product_name(), "Widget");
        assert_eq!(item.unit_price().cents(), 2000);
        assert_eq!(item.quantity(), 2);
    }

    #[test]
    fn add_item_zero_quantity_fails() {
        let mut order = new_order();
        let widget = product("Widget", 2000, 10);
        assert!(matches!(
            order.add_item(&widget, 0),
            Err(DomainError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn add_item_checks_available_stock() {
        let mut order = new_order();
        let widget = product("Widget", 2000, 3);
        let result = order.add_item(&widget, 5);
        assert!(matches!(result, Err(DomainError::InsufficientStock { .. })));
        assert_eq!(order.item_count(), 0);
    }

    #[test]
    fn adding_same_product_merges_lines() {
        let mut order = new_order();
        let widget = product("Widget", 1000, 10);

        order.add_item(&widget, 2).unwrap();
        order.add_item(&widget, 3).unwrap();

        assert_eq!(order.item_count(), 1);
        assert_eq!(order.item_for(widget.id()).unwrap().quantity(), 5);
        assert_eq!(order.total_amount().unwrap().cents(), 5000);
    }

    #[test]
    fn empty_order_total_is_zero() {
        let order = new_order();
        let total = order.total_amount().unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn total_sums_item_subtotals() {
        let mut order = new_order();
        order.add_item(&product("Widget", 2000, 10), 2).unwrap();
        order.add_item(&product("Gadget", 500, 10), 3).unwrap();
        assert_eq!(order.total_amount().unwrap().cents(), 5500);
    }

    #[test]
    fn mixed_currency_total_fails() {
        let mut order = new_order();
        order.add_item(&product("Widget", 2000, 10), 1).unwrap();
        let eur_gadget = Product::new(
            "Gadget",
            "",
            Money::new(500, Currency::EUR).unwrap(),
            10,
            "Gadgets",
        )
        .unwrap();
        order.add_item(&eur_gadget, 1).unwrap();

        assert!(matches!(
            order.total_amount(),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn status_walks_the_lattice() {
        let mut order = new_order();
        assert!(order.update_status(OrderStatus::Confirmed).unwrap().is_empty());
        assert!(order.update_status(OrderStatus::Processing).unwrap().is_empty());
        assert!(order.update_status(OrderStatus::Shipped).unwrap().is_empty());
        assert_eq!(order.status(), OrderStatus::Shipped);
    }

    #[test]
    fn skipping_states_is_rejected() {
        let mut order = new_order();
        let result = order.update_status(OrderStatus::Delivered);
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            })
        ));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn delivery_stamps_completion_and_emits_event() {
        let mut order = new_order();
        order.update_status(OrderStatus::Confirmed).unwrap();
        order.update_status(OrderStatus::Processing).unwrap();
        order.update_status(OrderStatus::Shipped).unwrap();

        let before = Utc::now();
        let events = order.update_status(OrderStatus::Delivered).unwrap();

        assert_eq!(order.status(), OrderStatus::Delivered);
        let completed_at = order.completed_at().unwrap();
        assert!(completed_at >= before && completed_at <= Utc::now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "OrderCompleted");
    }

    #[test]
    fn terminal_statuses_reject_updates() {
        let mut cancelled = new_order();
        cancelled.cancel().unwrap();
        assert!(matches!(
            cancelled.update_status(OrderStatus::Confirmed),
            Err(DomainError::TerminalStatus { .. })
        ));

        let mut delivered = new_order();
        delivered.update_status(OrderStatus::Confirmed).unwrap();
        delivered.update_status(OrderStatus::Processing).unwrap();
        delivered.update_status(OrderStatus::Shipped).unwrap();
        delivered.update_status(OrderStatus::Delivered).unwrap();
        assert!(matches!(
            delivered.update_status(OrderStatus::Cancelled),
            Err(DomainError::TerminalStatus { .. })
        ));
    }

    #[test]
    fn cancel_fails_only_when_delivered() {
        let mut order = new_order();
        order.update_status(OrderStatus::Confirmed).unwrap();
        order.update_status(OrderStatus::Processing).unwrap();
        order.update_status(OrderStatus::Shipped).unwrap();
        order.update_status(OrderStatus::Delivered).unwrap();

        assert!(matches!(
            order.cancel(),
            Err(DomainError::TerminalStatus { .. })
        ));

        let mut shipped = new_order();
        shipped.update_status(OrderStatus::Confirmed).unwrap();
        shipped.update_status(OrderStatus::Processing).unwrap();
        shipped.update_status(OrderStatus::Shipped).unwrap();
        shipped.cancel().unwrap();
        assert_eq!(shipped.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut order = new_order();
        order.add_item(&product("Widget", 2000, 10), 2).unwrap();

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id(), order.id());
        assert_eq!(deserialized.order_number(), order.order_number());
        assert_eq!(deserialized.item_count(), 1);
        assert_eq!(deserialized.total_amount().unwrap().cents(), 4000);
    }
}
