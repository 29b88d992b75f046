//! Product command handlers.

use std::sync::Arc;

use common::ProductId;
use domain::{Money, Product};
use store::{ChangeSet, ProductStore, UnitOfWork};

use crate::error::AppError;

/// Command to create a product.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub initial_stock: u32,
    pub category: String,
}

/// Command to replace a product's descriptive fields.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
}

/// Command to apply a stock delta (restock or manual correction).
#[derive(Debug, Clone)]
pub struct UpdateProductStock {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Command to soft-delete a product.
#[derive(Debug, Clone)]
pub struct DeleteProduct {
    pub product_id: ProductId,
}

/// Handles product commands.
pub struct ProductHandler<S> {
    store: Arc<S>,
}

impl<S> ProductHandler<S>
where
    S: ProductStore + UnitOfWork,
{
    /// Creates a new product handler.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a product with an initial stock level.
    #[tracing::instrument(skip(self))]
    pub async fn create_product(&self, cmd: CreateProduct) -> Result<ProductId, AppError> {
        let product = Product::new(
            cmd.name,
            cmd.description,
            cmd.price,
            cmd.initial_stock,
            cmd.category,
        )?;
        let product_id = product.id();

        let mut changes = ChangeSet::new();
        changes.insert_product(product);
        self.store.commit(changes).await?;

        Ok(product_id)
    }

    /// Replaces descriptive fields; stock and the active flag are
    /// untouched.
    #[tracing::instrument(skip(self))]
    pub async fn update_product(&self, cmd: UpdateProduct) -> Result<(), AppError> {
        let mut product = self.load(cmd.product_id).await?;
        product.update_details(cmd.name, cmd.description, cmd.price, cmd.category)?;
        self.save(product).await
    }

    /// Applies a stock delta through the single mutation point.
    #[tracing::instrument(skip(self))]
    pub async fn update_stock(&self, cmd: UpdateProductStock) -> Result<(), AppError> {
        let mut product = self.load(cmd.product_id).await?;
        product.update_stock(cmd.delta)?;
        self.save(product).await
    }

    /// Reactivates a product.
    #[tracing::instrument(skip(self))]
    pub async fn activate_product(&self, product_id: ProductId) -> Result<(), AppError> {
        let mut product = self.load(product_id).await?;
        product.activate();
        self.save(product).await
    }

    /// Deactivates a product.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_product(&self, product_id: ProductId) -> Result<(), AppError> {
        let mut product = self.load(product_id).await?;
        product.deactivate();
        self.save(product).await
    }

    /// Deletes a product. This is always a soft delete: the record stays
    /// so historical order snapshots keep a referent.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, cmd: DeleteProduct) -> Result<(), AppError> {
        self.deactivate_product(cmd.product_id).await
    }

    async fn load(&self, product_id: ProductId) -> Result<Product, AppError> {
        self.store
            .product(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product", product_id))
    }

    async fn save(&self, product: Product) -> Result<(), AppError> {
        let mut changes = ChangeSet::new();
        changes.update_product(product);
        self.store.commit(changes).await?;
        Ok(())
    }
}
