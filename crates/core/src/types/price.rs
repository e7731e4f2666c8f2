//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are captured from the product card when an item is added and are
//! never re-synced afterwards. Amounts are whole currency units as displayed
//! on the site (roubles), formatted the way the `ru-RU` locale does:
//! non-breaking-space digit groups, a decimal comma, at most three fraction
//! digits, followed by the rouble sign.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{ParseOutcome, Quantity};

/// Currency glyph appended to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₽";

/// Digit group separator used by the `ru-RU` locale (U+00A0).
const GROUP_SEPARATOR: char = '\u{a0}';

/// Fraction digits kept when formatting, matching the locale default.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative unit price or amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero roubles.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Read a price from a product card attribute.
    ///
    /// Accepts plain and scientific decimal notation with surrounding
    /// whitespace. Anything else, including negative amounts, is zero.
    ///
    /// ```
    /// use corner_shop_core::{ParseOutcome, Price};
    ///
    /// assert_eq!(Price::parse_lenient("500"), ParseOutcome::Parsed(Price::from_units(500)));
    /// assert_eq!(Price::parse_lenient("n/a"), ParseOutcome::Defaulted(Price::ZERO));
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: &str) -> ParseOutcome<Self> {
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
            .and_then(|amount| Self::new(amount).ok())
            .map_or(ParseOutcome::Defaulted(Self::ZERO), ParseOutcome::Parsed)
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units. Saturates at the largest representable amount.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }

    /// Format for display (e.g., "1 500 ₽").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {CURRENCY_SYMBOL}", format_amount(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Format a non-negative amount with `ru-RU` grouping and decimal comma.
fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = group_thousands(integer);
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
