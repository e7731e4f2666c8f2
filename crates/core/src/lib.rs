//! Corner Shop Core - Shared types library.
//!
//! This crate provides the domain types used across all Corner Shop components:
//! - `storefront` - Server-rendered shop with cart and contact pages
//! - `cli` - Command-line access to the same cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage access, no clock. This keeps it lightweight and lets the cart
//! rules be tested without a store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and emails
//! - [`cart`] - The cart and its add / update / remove rules
//! - [`contact`] - Contact form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod contact;
pub mod types;

pub use cart::{Cart, CartLine};
pub use contact::{
    ContactField, ContactFieldError, ContactForm, ContactRequest, FieldErrors, UnknownField,
};
pub use types::*;
