//! Cart inspection and maintenance commands.
//!
//! These operate on the same JSON store file the storefront uses when
//! `SHOP_STORE_PATH` is set, so a cart built in the browser can be examined
//! or repaired from the shell. Stop the storefront first: the file is not
//! locked across processes.
//!
//! # Usage
//!
//! ```bash
//! shop-cli --store data/shop.json cart show
//! shop-cli cart add mug "Ceramic Mug" 500
//! shop-cli cart set mug 3
//! shop-cli cart clear
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use corner_shop_core::{Cart, Price, ProductId};
use corner_shop_storefront::services::CartRepository;
use corner_shop_storefront::store::{JsonFileStore, StoreError};
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// No store file was given.
    #[error("No store file: pass --store or set SHOP_STORE_PATH")]
    MissingStore,

    /// Store read or write failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The cart has no line with this ID.
    #[error("No cart line with id: {0}")]
    UnknownItem(String),
}

/// Open the cart stored in `path`.
///
/// # Errors
///
/// Returns `MissingStore` if no path was given, or a store error if the
/// file's directory cannot be created.
pub fn open(path: Option<PathBuf>) -> Result<CartRepository, CartCommandError> {
    let path = path.ok_or(CartCommandError::MissingStore)?;
    let store = JsonFileStore::open(path)?;
    tracing::debug!(path = %store.path().display(), "Opened store");
    Ok(CartRepository::new(Arc::new(store)))
}

/// Add a product, or one more unit of it.
///
/// # Errors
///
/// Returns a store error if the cart cannot be saved.
pub fn add(
    repo: &CartRepository,
    id: &str,
    name: &str,
    price: &str,
) -> Result<Cart, CartCommandError> {
    let price = Price::parse_lenient(price);
    if price.is_defaulted() {
        tracing::warn!("Price is not a non-negative number, using 0");
    }

    let (cart, quantity) =
        repo.update(|cart| cart.add_item(ProductId::from(id), name, price.into_inner()))?;
    tracing::info!(id, quantity = quantity.get(), "Added to cart");
    Ok(cart)
}

/// Set a line's quantity from free text, as the quantity field does.
///
/// # Errors
///
/// Returns `UnknownItem` if no line has `id`, or a store error.
pub fn set(repo: &CartRepository, id: &str, qty: &str) -> Result<Cart, CartCommandError> {
    require_line(repo, id)?;
    let (cart, quantity) = repo.update(|cart| cart.set_quantity(id, qty))?;
    if quantity.is_defaulted() {
        tracing::warn!(raw = qty, "Quantity unreadable, set to 1");
    }
    Ok(cart)
}

/// Add one unit to a line.
///
/// # Errors
///
/// Returns `UnknownItem` if no line has `id`, or a store error.
pub fn increment(repo: &CartRepository, id: &str) -> Result<Cart, CartCommandError> {
    changed_or_unknown(repo.update(|cart| cart.increment(id))?, id)
}

/// Remove one unit from a line; a line never drops below 1.
///
/// # Errors
///
/// Returns `UnknownItem` if no line has `id`, or a store error.
pub fn decrement(repo: &CartRepository, id: &str) -> Result<Cart, CartCommandError> {
    changed_or_unknown(repo.update(|cart| cart.decrement(id))?, id)
}

/// Remove a line.
///
/// # Errors
///
/// Returns `UnknownItem` if no line has `id`, or a store error.
pub fn remove(repo: &CartRepository, id: &str) -> Result<Cart, CartCommandError> {
    let (cart, removed) = repo.update(|cart| cart.remove_item(id))?;
    removed.map_or_else(|| Err(CartCommandError::UnknownItem(id.to_owned())), |_| Ok(cart))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns a store error if the cart cannot be saved.
pub fn clear(repo: &CartRepository) -> Result<Cart, CartCommandError> {
    Ok(repo.clear()?)
}

fn require_line(repo: &CartRepository, id: &str) -> Result<(), CartCommandError> {
    if repo.load().get(id).is_some() {
        Ok(())
    } else {
        Err(CartCommandError::UnknownItem(id.to_owned()))
    }
}

fn changed_or_unknown((cart, found): (Cart, bool), id: &str) -> Result<Cart, CartCommandError> {
    if found {
        Ok(cart)
    } else {
        Err(CartCommandError::UnknownItem(id.to_owned()))
    }
}

/// Render a cart as a plain-text table.
#[must_use]
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_owned();
    }

    let mut out = String::new();
    for line in cart {
        let _ = writeln!(
            out,
            "{:<16} {:<28} {:>4} x {:>12} = {:>12}",
            line.id,
            line.name,
            line.qty,
            line.price.display(),
            line.subtotal().display(),
        );
    }
    let _ = writeln!(
        out,
        "Items: {}  Total: {}",
        cart.count(),
        cart.total().display()
    );
    out
}
