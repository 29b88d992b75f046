//! Repository and unit-of-work traits consumed by the orchestration layer.

use async_trait::async_trait;
use common::{CustomerId, OrderId, ProductId};
use domain::{Customer, Order, Product};

use crate::{ChangeSet, Result};

/// A page request for listings.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Items per page.
    pub size: usize,
}

impl Page {
    /// Creates a page request. Page numbers below 1 are clamped to 1.
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size,
        }
    }

    /// Returns the number of items to skip.
    pub fn offset(&self) -> usize {
        (self.number - 1) * self.size
    }
}

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Customer lookups.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Point lookup by id.
    async fn customer(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Lookup by normalized email address.
    async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>>;

    /// All customers, newest first.
    async fn customers(&self) -> Result<Vec<Customer>>;
}

/// Product lookups.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point lookup by id.
    async fn product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Active products in a category.
    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Paged listing of all products, newest first.
    async fn products(&self, page: Page) -> Result<Paged<Product>>;
}

/// Order lookups.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Point lookup by id, items included.
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Lookup by human-facing order number.
    async fn order_by_number(&self, order_number: &str) -> Result<Option<Order>>;

    /// All orders placed by a customer, newest first.
    async fn orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    /// Returns true if the customer has placed any order, in any status.
    async fn customer_has_orders(&self, customer_id: CustomerId) -> Result<bool>;

    /// Paged listing of all orders, newest first.
    async fn orders(&self, page: Page) -> Result<Paged<Order>>;
}

/// Atomic commit of one operation's staged changes.
///
/// Commit is the atomicity boundary: every change in the set is validated
/// against the stored versions before any is applied, so concurrent writers
/// cannot interleave partial results. A failed commit leaves the store
/// untouched.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Applies all staged changes or none of them.
    async fn commit(&self, changes: ChangeSet) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offsets() {
        assert_eq!(Page::new(1, 20).offset(), 0);
        assert_eq!(Page::new(3, 10).offset(), 20);
    }

    #[test]
    fn page_number_clamped_to_one() {
        assert_eq!(Page::new(0, 10).number, 1);
        assert_eq!(Page::new(0, 10).offset(), 0);
    }
}
