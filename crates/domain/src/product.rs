//! Product entity: the stock ledger.

use chrono::{DateTime, Utc};
use common::{ProductId, Version};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::money::Money;

/// A sellable product owning a non-negative stock counter.
///
/// [`Product::update_stock`] is the single mutation point for the counter;
/// order placement and cancellation both go through it. Products are never
/// hard-deleted, only deactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    stock_quantity: u32,
    category: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: Version,
}

impl Product {
    /// Creates a new active product with an initial stock level.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        initial_stock: u32,
        category: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::MissingField {
                field: "product name",
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            name,
            description: description.into(),
            price,
            stock_quantity: initial_stock,
            category: category.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
            version: Version::initial(),
        })
    }

    /// Applies a stock delta. Positive for restock or returned inventory,
    /// negative for consumption.
    ///
    /// Fails with [`DomainError::InsufficientStock`] when the result would
    /// be negative and [`DomainError::StockOverflow`] when it would exceed
    /// the counter's range; the counter is unchanged either way.
    pub fn update_stock(&mut self, delta: i64) -> Result<(), DomainError> {
        let new_quantity = match (self.stock_quantity as i64).checked_add(delta) {
            Some(quantity) if quantity < 0 => {
                return Err(DomainError::InsufficientStock {
                    name: self.name.clone(),
                });
            }
            Some(quantity) => quantity,
            None if delta < 0 => {
                return Err(DomainError::InsufficientStock {
                    name: self.name.clone(),
                });
            }
            None => {
                return Err(DomainError::StockOverflow {
                    name: self.name.clone(),
                });
            }
        };
        self.stock_quantity =
            u32::try_from(new_quantity).map_err(|_| DomainError::StockOverflow {
                name: self.name.clone(),
            })?;
        self.touch();
        Ok(())
    }

    /// Replaces the descriptive fields. Stock and the active flag are not
    /// affected.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::MissingField {
                field: "product name",
            });
        }
        self.name = name;
        self.description = description.into();
        self.price = price;
        self.category = category.into();
        self.touch();
        Ok(())
    }

    /// Marks the product as inactive. Soft delete; stock is retained.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Marks the product as active again.
    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_active(&self) -> bool {
        self.is_active
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn widget(stock: u32) -> Product {
        Product::new(
            "Widget",
            "A useful widget",
            Money::usd(2000).unwrap(),
            stock,
            "Gadgets",
        )
        .unwrap()
    }

    #[test]
    fn new_product_is_active() {
        let product = widget(10);
        assert!(product.is_active());
        assert_eq!(product.stock_quantity(), 10);
    }

    #[test]
    fn empty_name_rejected() {
        let result = Product::new("  ", "desc", Money::zero(), 0, "Misc");
        assert!(matches!(result, Err(DomainError::MissingField { .. })));
    }

    #[test]
    fn restock_and_consume() {
        let mut product = widget(10);
        product.update_stock(-4).unwrap();
        assert_eq!(product.stock_quantity(), 6);
        product.update_stock(2).unwrap();
        assert_eq!(product.stock_quantity(), 8);
    }

    #[test]
    fn overdraw_fails_and_leaves_stock_unchanged() {
        let mut product = widget(3);
        let result = product.update_stock(-5);
        assert!(matches!(result, Err(DomainError::InsufficientStock { .. })));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InsufficientStock);
        assert_eq!(product.stock_quantity(), 3);
    }

    #[test]
    fn restock_past_counter_range_fails() {
        let mut product = widget(0);
        let result = product.update_stock(u32::MAX as i64 + 1);
        assert!(matches!(result, Err(DomainError::StockOverflow { .. })));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(product.stock_quantity(), 0);

        let mut full = widget(u32::MAX);
        assert!(full.update_stock(1).is_err());
        assert_eq!(full.stock_quantity(), u32::MAX);
    }

    #[test]
    fn extreme_negative_delta_is_insufficient_stock() {
        let mut product = widget(3);
        let result = product.update_stock(i64::MIN);
        assert!(matches!(result, Err(DomainError::InsufficientStock { .. })));
        assert_eq!(product.stock_quantity(), 3);
    }

    #[test]
    fn consume_to_exactly_zero_is_allowed() {
        let mut product = widget(3);
        product.update_stock(-3).unwrap();
        assert_eq!(product.stock_quantity(), 0);
    }

    #[test]
    fn update_details_does_not_touch_stock_or_flag() {
        let mut product = widget(5);
        product.deactivate();
        product
            .update_details("Widget v2", "Better", Money::usd(2500).unwrap(), "Gadgets")
            .unwrap();
        assert_eq!(product.name(), "Widget v2");
        assert_eq!(product.stock_quantity(), 5);
        assert!(!product.is_active());
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut product = widget(1);
        product.deactivate();
        product.deactivate();
        assert!(!product.is_active());
        product.activate();
        assert!(product.is_active());
    }
}
