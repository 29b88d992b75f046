//! Customer command handlers.

use std::sync::Arc;

use common::CustomerId;
use domain::{Address, Customer, Email};
use store::{ChangeSet, CustomerStore, OrderStore, UnitOfWork};

use crate::error::AppError;

/// Command to register a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: Address,
}

/// Command to update a customer's contact details.
#[derive(Debug, Clone)]
pub struct UpdateCustomer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: Address,
}

/// Command to delete a customer account.
#[derive(Debug, Clone)]
pub struct DeleteCustomer {
    pub customer_id: CustomerId,
}

/// Handles customer commands.
pub struct CustomerHandler<S> {
    store: Arc<S>,
}

impl<S> CustomerHandler<S>
where
    S: CustomerStore + OrderStore + UnitOfWork,
{
    /// Creates a new customer handler.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a customer. The email address must be unique.
    #[tracing::instrument(skip(self))]
    pub async fn create_customer(&self, cmd: CreateCustomer) -> Result<CustomerId, AppError> {
        let email = Email::parse(&cmd.email)?;

        if let Some(existing) = self.store.customer_by_email(email.as_str()).await? {
            return Err(AppError::conflict(format!(
                "Customer with email {} already exists",
                existing.email()
            )));
        }

        let customer = Customer::new(
            cmd.first_name,
            cmd.last_name,
            email,
            cmd.phone_number,
            cmd.address,
        )?;
        let customer_id = customer.id();

        let mut changes = ChangeSet::new();
        changes.insert_customer(customer);
        self.store.commit(changes).await?;

        Ok(customer_id)
    }

    /// Updates a customer's contact details.
    #[tracing::instrument(skip(self))]
    pub async fn update_customer(&self, cmd: UpdateCustomer) -> Result<(), AppError> {
        let mut customer = self
            .store
            .customer(cmd.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("customer", cmd.customer_id))?;

        customer.update_info(cmd.first_name, cmd.last_name, cmd.phone_number, cmd.address)?;

        let mut changes = ChangeSet::new();
        changes.update_customer(customer);
        self.store.commit(changes).await?;

        Ok(())
    }

    /// Deletes a customer. A customer with any order history, even
    /// cancelled orders, is never deletable.
    #[tracing::instrument(skip(self))]
    pub async fn delete_customer(&self, cmd: DeleteCustomer) -> Result<(), AppError> {
        let customer = self
            .store
            .customer(cmd.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("customer", cmd.customer_id))?;

        if self.store.customer_has_orders(customer.id()).await? {
            return Err(AppError::conflict(
                "Cannot delete customer with existing orders",
            ));
        }

        let mut changes = ChangeSet::new();
        changes.delete_customer(customer.id());
        self.store.commit(changes).await?;

        Ok(())
    }
}
