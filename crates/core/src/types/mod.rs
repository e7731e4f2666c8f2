//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod outcome;
pub mod price;
pub mod product;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use outcome::ParseOutcome;
pub use price::{CURRENCY_SYMBOL, Price, PriceError};
pub use product::Product;
pub use quantity::{Quantity, QuantityError};
