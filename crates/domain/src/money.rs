//! Money value object with currency-guarded arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A three-letter ISO currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// US dollars, the default currency.
    pub const USD: Currency = Currency(*b"USD");

    /// Euros.
    pub const EUR: Currency = Currency(*b"EUR");

    /// Parses a currency code. Must be exactly three ASCII letters;
    /// lowercase input is normalized to uppercase.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency {
                value: code.to_string(),
            });
        }
        let mut out = [0u8; 3];
        for (i, b) in bytes.iter().enumerate() {
            out[i] = b.to_ascii_uppercase();
        }
        Ok(Currency(out))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Validated as ASCII letters on construction.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.as_str().to_string()
    }
}

/// A non-negative money amount in a single currency.
///
/// The amount is held in minor units (cents) to avoid floating point issues.
/// Every operation produces a new value; arithmetic across currencies fails
/// with [`DomainError::CurrencyMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units (e.g., 1000 = $10.00).
    cents: i64,
    currency: Currency,
}

impl Money {
    /// Creates a money amount. Fails if the amount is negative.
    pub fn new(cents: i64, currency: Currency) -> Result<Self, DomainError> {
        if cents < 0 {
            return Err(DomainError::NegativeAmount { cents });
        }
        Ok(Self { cents, currency })
    }

    /// Creates a US dollar amount from cents.
    pub fn usd(cents: i64) -> Result<Self, DomainError> {
        Self::new(cents, Currency::USD)
    }

    /// Returns zero in the default currency, the additive identity.
    pub fn zero() -> Self {
        Self {
            cents: 0,
            currency: Currency::USD,
        }
    }

    /// Returns the amount in minor units.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the whole-unit portion.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the minor-unit remainder after whole units.
    pub fn subunits(&self) -> i64 {
        self.cents % 100
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Adds another amount of the same currency. Fails if the sum exceeds
    /// the representable range.
    pub fn checked_add(&self, other: Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;
        let cents = self
            .cents
            .checked_add(other.cents)
            .ok_or(DomainError::AmountOverflow)?;
        Ok(Money {
            cents,
            currency: self.currency,
        })
    }

    /// Subtracts another amount of the same currency. Fails if the result
    /// would be negative.
    pub fn checked_sub(&self, other: Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;
        Money::new(self.cents - other.cents, self.currency)
    }

    /// Multiplies by a quantity, staying in the same currency. Fails if the
    /// product exceeds the representable range.
    pub fn multiply(&self, quantity: u32) -> Result<Money, DomainError> {
        let cents = self
            .cents
            .checked_mul(quantity as i64)
            .ok_or(DomainError::AmountOverflow)?;
        Ok(Money {
            cents,
            currency: self.currency,
        })
    }

    fn require_same_currency(&self, other: Money) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02} {}", self.units(), self.subunits(), self.currency)
    }
}
