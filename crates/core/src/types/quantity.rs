//! Cart line quantity.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ParseOutcome;

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units of one product in the cart.
///
/// Always at least 1. Arithmetic saturates instead of wrapping, and
/// [`Quantity::decrement`] stops at 1 rather than reaching zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest quantity a cart line can hold.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for `0`.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(value))
        }
    }

    /// Parse free-form text typed into a quantity field.
    ///
    /// Every non-digit character is discarded before parsing, so `"1 2"` and
    /// `"x12"` both read as 12. Empty input, zero and values that do not fit
    /// in a `u32` fall back to 1.
    ///
    /// ```
    /// use corner_shop_core::{ParseOutcome, Quantity};
    ///
    /// assert_eq!(Quantity::parse_lenient(" 4 pcs").into_inner().get(), 4);
    /// assert_eq!(Quantity::parse_lenient("abc"), ParseOutcome::Defaulted(Quantity::ONE));
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: &str) -> ParseOutcome<Self> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        match digits.parse::<u32>().ok().and_then(|n| Self::new(n).ok()) {
            Some(quantity) => ParseOutcome::Parsed(quantity),
            None => ParseOutcome::Defaulted(Self::ONE),
        }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, never below 1.
    #[must_use]
    pub const fn decrement(self) -> Self {
        if self.0 > 1 { Self(self.0 - 1) } else { Self::ONE }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

// Stored carts may carry a missing, fractional, textual or non-positive
// quantity. Any of those reads as 1.
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(from_json_value(&value))
    }
}

fn from_json_value(value: &serde_json::Value) -> Quantity {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(|n| Quantity::new(n).ok())
        .unwrap_or(Quantity::ONE)
}
