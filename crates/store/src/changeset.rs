//! Staged changes committed as one atomic unit.

use common::CustomerId;
use domain::{Customer, Order, Product};

/// A staged change to a customer record.
#[derive(Debug, Clone)]
pub enum CustomerChange {
    Insert(Customer),
    Update(Customer),
    Delete(CustomerId),
}

/// A staged change to a product record. Products are never deleted, only
/// deactivated, so there is no delete variant.
#[derive(Debug, Clone)]
pub enum ProductChange {
    Insert(Product),
    Update(Product),
}

/// A staged change to an order record. Orders are never deleted.
#[derive(Debug, Clone)]
pub enum OrderChange {
    Insert(Order),
    Update(Order),
}

/// All changes belonging to one logical operation.
///
/// A change set is handed to [`UnitOfWork::commit`](crate::UnitOfWork) and
/// applied atomically: every staged change is validated against the stored
/// versions first, then all of them land, or none do.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub(crate) customers: Vec<CustomerChange>,
    pub(crate) products: Vec<ProductChange>,
    pub(crate) orders: Vec<OrderChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a new customer.
    pub fn insert_customer(&mut self, customer: Customer) -> &mut Self {
        self.customers.push(CustomerChange::Insert(customer));
        self
    }

    /// Stages an update to an existing customer.
    pub fn update_customer(&mut self, customer: Customer) -> &mut Self {
        self.customers.push(CustomerChange::Update(customer));
        self
    }

    /// Stages removal of a customer.
    pub fn delete_customer(&mut self, id: CustomerId) -> &mut Self {
        self.customers.push(CustomerChange::Delete(id));
        self
    }

    /// Stages a new product.
    pub fn insert_product(&mut self, product: Product) -> &mut Self {
        self.products.push(ProductChange::Insert(product));
        self
    }

    /// Stages an update to an existing product.
    pub fn update_product(&mut self, product: Product) -> &mut Self {
        self.products.push(ProductChange::Update(product));
        self
    }

    /// Stages a new order.
    pub fn insert_order(&mut self, order: Order) -> &mut Self {
        self.orders.push(OrderChange::Insert(order));
        self
    }

    /// Stages an update to an existing order.
    pub fn update_order(&mut self, order: Order) -> &mut Self {
        self.orders.push(OrderChange::Update(order));
        self
    }

    /// Returns true if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.products.is_empty() && self.orders.is_empty()
    }

    /// Returns the number of staged changes.
    pub fn len(&self) -> usize {
        self.customers.len() + self.products.len() + self.orders.len()
    }
}
