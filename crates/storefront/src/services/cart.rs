//! Cart persistence.
//!
//! [`CartRepository`] is the only code that reads or writes the cart key.
//! There is no cached cart: every operation loads the stored value, applies
//! one change, and writes the whole cart back.

use std::sync::Arc;

use corner_shop_core::{Cart, ParseOutcome};

use crate::store::{KeyValueStore, StoreError};

/// Store key holding the serialized cart.
pub const CART_KEY: &str = "cartItems";

/// Repository for the visitor's cart.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CartRepository {
    /// Create a new cart repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the cart, reporting whether it was decoded or substituted.
    ///
    /// A missing key, an unreadable store and malformed content all produce
    /// `Defaulted(empty cart)`. Failures are logged, never returned.
    #[must_use]
    pub fn load_outcome(&self) -> ParseOutcome<Cart> {
        let raw = match self.store.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ParseOutcome::Defaulted(Cart::new()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart, using empty cart");
                return ParseOutcome::Defaulted(Cart::new());
            }
        };

        match serde_json::from_str::<Option<Cart>>(&raw) {
            Ok(Some(cart)) => ParseOutcome::Parsed(cart),
            // A stored `null` reads as empty, like an absent key.
            Ok(None) => ParseOutcome::Defaulted(Cart::new()),
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart is malformed, using empty cart");
                ParseOutcome::Defaulted(Cart::new())
            }
        }
    }

    /// Load the cart. Never fails; see [`Self::load_outcome`].
    #[must_use]
    pub fn load(&self) -> Cart {
        self.load_outcome().into_inner()
    }

    /// Replace the stored cart with `cart`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let json = serde_json::to_string(cart)?;
        self.store.set(CART_KEY, &json)
    }

    /// Empty the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn clear(&self) -> Result<Cart, StoreError> {
        let cart = Cart::new();
        self.save(&cart)?;
        tracing::info!("Cart cleared");
        Ok(cart)
    }

    /// Load, apply `change`, save, and return the saved cart with the
    /// change's result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn update<T>(&self, change: impl FnOnce(&mut Cart) -> T) -> Result<(Cart, T), StoreError> {
        let mut cart = self.load();
        let result = change(&mut cart);
        self.save(&cart)?;
        Ok((cart, result))
    }
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository")
            .field("key", &CART_KEY)
            .finish_non_exhaustive()
    }
}
