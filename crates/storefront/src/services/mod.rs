//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart persistence (load / save / clear over the key-value store)
//! - `contact` - Append-only contact request log

pub mod cart;
pub mod contact;

pub use cart::{CART_KEY, CartRepository};
pub use contact::{CONTACT_REQUESTS_KEY, ContactLog};
