//! Customer entity.
//!
//! A customer does not hold a live collection of its orders; the "orders of
//! a customer" view is a repository query keyed by [`CustomerId`]. This
//! avoids a cyclic Customer/Order ownership link.

use chrono::{DateTime, Utc};
use common::{CustomerId, Version};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::values::{Address, Email};

/// A customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: Email,
    phone_number: String,
    address: Address,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: Version,
}

impl Customer {
    /// Creates a new customer. First and last name must be non-empty.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Email,
        phone_number: impl Into<String>,
        address: Address,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.trim().is_empty() {
            return Err(DomainError::MissingField {
                field: "first name",
            });
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::MissingField { field: "last name" });
        }

        let now = Utc::now();
        Ok(Self {
            id: CustomerId::new(),
            first_name,
            last_name,
            email,
            phone_number: phone_number.into(),
            address,
            created_at: now,
            updated_at: now,
            version: Version::initial(),
        })
    }

    /// Replaces the contact details. The email address is immutable once
    /// the account exists.
    pub fn update_info(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
        address: Address,
    ) -> Result<(), DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.trim().is_empty() {
            return Err(DomainError::MissingField {
                field: "first name",
            });
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::MissingField { field: "last name" });
        }
        self.first_name = first_name;
        self.last_name = last_name;
        self.phone_number = phone_number.into();
        self.address = address;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn address(&self) -> &Address {
        &self.address
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

    fn jane() -> Customer {
        Customer::new(
            "Jane",
            "Doe",
            Email::parse("jane@example.com").unwrap(),
            "555-0101",
            Address::new("1 Main St", "Springfield", "IL", "62701", "USA"),
        )
        .unwrap()
    }

    #[test]
    fn full_name_joins_parts() {
        assert_eq!(jane().full_name(), "Jane Doe");
    }

    #[test]
    fn blank_names_rejected() {
        let email = Email::parse("jane@example.com").unwrap();
        let address = Address::new("1 Main St", "Springfield", "IL", "62701", "USA");
        assert!(Customer::new("", "Doe", email.clone(), "", address.clone()).is_err());
        assert!(Customer::new("Jane", "  ", email, "", address).is_err());
    }

    #[test]
    fn update_info_replaces_contact_details() {
        let mut customer = jane();
        customer
            .update_info(
                "Janet",
                "Doe",
                "555-0202",
                Address::new("2 Oak Ave", "Shelbyville", "IL", "62565", "USA"),
            )
            .unwrap();
        assert_eq!(customer.first_name(), "Janet");
        assert_eq!(customer.phone_number(), "555-0202");
        assert_eq!(customer.email().as_str(), "jane@example.com");
    }
}
