//! Order command handlers: the cross-entity sequencing lives here.

use std::collections::HashMap;
use std::sync::Arc;

use common::{CustomerId, OrderId, ProductId};
use domain::{Address, Order, OrderEvent, OrderStatus, PaymentMethod, Product};
use store::{ChangeSet, CustomerStore, OrderStore, ProductStore, UnitOfWork};

use crate::error::AppError;
use crate::services::{EventPublisher, Notifier};

/// One requested line of a new order.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Command to create an order with its items.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
    pub items: Vec<OrderLine>,
}

/// Command to cancel an order and restore its stock.
#[derive(Debug, Clone)]
pub struct CancelOrder {
    pub order_id: OrderId,
}

/// Command to move an order along its status lattice.
#[derive(Debug, Clone)]
pub struct UpdateOrderStatus {
    pub order_id: OrderId,
    pub new_status: OrderStatus,
}

/// Handles order commands.
///
/// Every command loads entities, runs the domain operations, and commits
/// all resulting changes through one unit of work. A failure anywhere
/// before the commit leaves the store untouched; side effects run only
/// after the commit and never undo it.
pub struct OrderHandler<S> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    publisher: Arc<dyn EventPublisher>,
}

impl<S> OrderHandler<S>
where
    S: CustomerStore + ProductStore + OrderStore + UnitOfWork,
{
    /// Creates a new order handler.
    pub fn new(
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            notifier,
            publisher,
        }
    }

    /// Creates an order for a customer, reserving stock for every line.
    ///
    /// Each line is checked by `Order::add_item` and then actually
    /// decremented with `Product::update_stock(-quantity)`; the order
    /// insert and all product updates go into a single commit, so a
    /// failing line means nothing is persisted.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<OrderId, AppError> {
        let customer = self
            .store
            .customer(cmd.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("customer", cmd.customer_id))?;

        let (mut order, created) =
            Order::create(cmd.customer_id, cmd.payment_method, cmd.shipping_address);

        // Load each product once; a command may repeat a product across
        // lines and both lines must hit the same in-memory counter.
        let mut products: HashMap<ProductId, Product> = HashMap::new();
        for line in &cmd.items {
            if !products.contains_key(&line.product_id) {
                let product = self
                    .store
                    .product(line.product_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("product", line.product_id))?;
                products.insert(line.product_id, product);
            }
        }

        for line in &cmd.items {
            let product = products
                .get_mut(&line.product_id)
                .ok_or_else(|| AppError::not_found("product", line.product_id))?;
            order.add_item(product, line.quantity)?;
            product.update_stock(-(line.quantity as i64))?;
        }

        let order_id = order.id();
        let order_number = order.order_number().to_string();

        let mut changes = ChangeSet::new();
        for product in products.into_values() {
            changes.update_product(product);
        }
        changes.insert_order(order);
        self.store.commit(changes).await?;

        self.publish(created).await;

        // Fire-and-continue: a failed confirmation never rolls back the
        // committed order.
        if let Err(error) = self
            .notifier
            .send_order_confirmation(customer.email().as_str(), &order_number)
            .await
        {
            tracing::warn!(%error, %order_id, "order confirmation not sent");
        }

        Ok(order_id)
    }

    /// Cancels an order and returns its reserved stock to the ledger.
    ///
    /// Allowed only from `Pending`, `Confirmed`, or `Processing`; this is
    /// stricter than the bare domain guard. A product that vanished since
    /// the order was placed skips restoration for that line.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, cmd: CancelOrder) -> Result<(), AppError> {
        let mut order = self
            .store
            .order(cmd.order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order", cmd.order_id))?;

        match order.status() {
            OrderStatus::Delivered => {
                return Err(AppError::conflict("Cannot cancel a delivered order"));
            }
            OrderStatus::Cancelled => {
                return Err(AppError::conflict("Order is already cancelled"));
            }
            OrderStatus::Shipped => {
                return Err(AppError::conflict(
                    "Cannot cancel an order that has been shipped",
                ));
            }
            _ => {}
        }

        let mut changes = ChangeSet::new();
        for item in order.items() {
            match self.store.product(item.product_id()).await? {
                Some(mut product) => {
                    product.update_stock(item.quantity() as i64)?;
                    changes.update_product(product);
                }
                None => {
                    // Accepted lossy behavior: inventory for a vanished
                    // product cannot be restored.
                    tracing::warn!(
                        product_id = %item.product_id(),
                        order_id = %order.id(),
                        "product no longer exists, stock not restored"
                    );
                }
            }
        }

        order.cancel()?;
        changes.update_order(order);
        self.store.commit(changes).await?;

        Ok(())
    }

    /// Moves an order to a new status; the domain enforces the lattice.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_status(&self, cmd: UpdateOrderStatus) -> Result<(), AppError> {
        let mut order = self
            .store
            .order(cmd.order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order", cmd.order_id))?;

        let events = order.update_status(cmd.new_status)?;

        let mut changes = ChangeSet::new();
        changes.update_order(order);
        self.store.commit(changes).await?;

        for event in events {
            self.publish(event).await;
        }

        Ok(())
    }

    async fn publish(&self, event: OrderEvent) {
        let event_type = event.event_type();
        if let Err(error) = self.publisher.publish(event).await {
            tracing::warn!(%error, event_type, "domain event not published");
        }
    }
}
