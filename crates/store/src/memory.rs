use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CustomerId, OrderId, ProductId, Version};
use domain::{Customer, Order, Product};
use tokio::sync::RwLock;

use crate::{
    ChangeSet, CustomerChange, OrderChange, ProductChange, Result, StoreError,
    repository::{CustomerStore, OrderStore, Page, Paged, ProductStore, UnitOfWork},
};

#[derive(Debug, Default)]
struct State {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, Order>,
}

/// In-memory store implementation for testing.
///
/// Holds every entity map behind one lock so a commit observes and mutates
/// a single consistent state. Updates are version-checked: committing an
/// entity whose stored version moved on fails with
/// [`StoreError::VersionConflict`] and applies nothing.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored customers.
    pub async fn customer_count(&self) -> usize {
        self.state.read().await.customers.len()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Clears all stored entities.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.customers.clear();
        state.products.clear();
        state.orders.clear();
    }
}

fn validate(state: &State, changes: &ChangeSet) -> Result<()> {
    for change in &changes.customers {
        match change {
            CustomerChange::Insert(customer) => {
                if state.customers.contains_key(&customer.id()) {
                    return Err(StoreError::DuplicateEntity {
                        entity: "customer",
                        id: customer.id().to_string(),
                    });
                }
            }
            CustomerChange::Update(customer) => {
                check_version(
                    "customer",
                    customer.id().to_string(),
                    customer.version(),
                    state.customers.get(&customer.id()).map(Customer::version),
                )?;
            }
            CustomerChange::Delete(id) => {
                if !state.customers.contains_key(id) {
                    return Err(StoreError::MissingEntity {
                        entity: "customer",
                        id: id.to_string(),
                    });
                }
            }
        }
    }

    for change in &changes.products {
        match change {
            ProductChange::Insert(product) => {
                if state.products.contains_key(&product.id()) {
                    return Err(StoreError::DuplicateEntity {
                        entity: "product",
                        id: product.id().to_string(),
                    });
                }
            }
            ProductChange::Update(product) => {
                check_version(
                    "product",
                    product.id().to_string(),
                    product.version(),
                    state.products.get(&product.id()).map(Product::version),
                )?;
            }
        }
    }

    for change in &changes.orders {
        match change {
            OrderChange::Insert(order) => {
                if state.orders.contains_key(&order.id()) {
                    return Err(StoreError::DuplicateEntity {
                        entity: "order",
                        id: order.id().to_string(),
                    });
                }
            }
            OrderChange::Update(order) => {
                check_version(
                    "order",
                    order.id().to_string(),
                    order.version(),
                    state.orders.get(&order.id()).map(Order::version),
                )?;
            }
        }
    }

    Ok(())
}

fn check_version(
    entity: &'static str,
    id: String,
    expected: Version,
    stored: Option<Version>,
) -> Result<()> {
    match stored {
        None => Err(StoreError::MissingEntity { entity, id }),
        Some(actual) if actual != expected => Err(StoreError::VersionConflict {
            entity,
            id,
            expected,
            actual,
        }),
        Some(_) => Ok(()),
    }
}

fn apply(state: &mut State, changes: ChangeSet) {
    for change in changes.customers {
        match change {
            CustomerChange::Insert(mut customer) | CustomerChange::Update(mut customer) => {
                customer.set_version(customer.version().next());
                state.customers.insert(customer.id(), customer);
            }
            CustomerChange::Delete(id) => {
                state.customers.remove(&id);
            }
        }
    }
    for change in changes.products {
        match change {
            ProductChange::Insert(mut product) | ProductChange::Update(mut product) => {
                product.set_version(product.version().next());
                state.products.insert(product.id(), product);
            }
        }
    }
    for change in changes.orders {
        match change {
            OrderChange::Insert(mut order) | OrderChange::Update(mut order) => {
                order.set_version(order.version().next());
                state.orders.insert(order.id(), order);
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn commit(&self, changes: ChangeSet) -> Result<()> {
        let mut state = self.state.write().await;
        // Validate everything before touching anything.
        validate(&state, &changes)?;
        apply(&mut state, changes);
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.state.read().await.customers.get(&id).cloned())
    }

    async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let needle = email.trim().to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .customers
            .values()
            .find(|c| c.email().as_str() == needle)
            .cloned())
    }

    async fn customers(&self) -> Result<Vec<Customer>> {
        let state = self.state.read().await;
        let mut all: Vec<_> = state.customers.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        let mut matching: Vec<_> = state
            .products
            .values()
            .filter(|p| p.is_active() && p.category() == category)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    async fn products(&self, page: Page) -> Result<Paged<Product>> {
        let state = self.state.read().await;
        let mut all: Vec<_> = state.products.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let total = all.len();
        let items = all
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();
        Ok(Paged { items, total })
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn order_by_number(&self, order_number: &str) -> Result<Option<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .find(|o| o.order_number() == order_number)
            .cloned())
    }

    async fn orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        let mut matching: Vec<_> = state
            .orders
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    async fn customer_has_orders(&self, customer_id: CustomerId) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .any(|o| o.customer_id() == customer_id))
    }

    async fn orders(&self, page: Page) -> Result<Paged<Order>> {
        let state = self.state.read().await;
        let mut all: Vec<_> = state.orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let total = all.len();
        let items = all
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();
        Ok(Paged { items, total })
    }
}
