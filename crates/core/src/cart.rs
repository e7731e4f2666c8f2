//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s keyed by product ID. Lines
//! keep the order in which products were first added, and every line holds a
//! quantity of at least one. Nothing here performs I/O: loading and saving
//! the cart is the storefront's job.
//!
//! # Serialized form
//!
//! ```json
//! [{"id": "p1", "name": "Mug", "price": "500", "qty": 2}]
//! ```
//!
//! Numeric prices are accepted when reading. A missing or invalid `qty`
//! reads as 1, and repeated IDs are merged into the first occurrence.

use serde::{Deserialize, Serialize};

use crate::types::{ParseOutcome, Price, ProductId, Quantity};

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    /// Display name captured when the product was added.
    pub name: String,
    /// Unit price captured when the product was added.
    pub price: Price,
    #[serde(default)]
    pub qty: Quantity,
}

impl CartLine {
    /// A new line holding a single unit.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            qty: Quantity::ONE,
        }
    }

    /// `qty × price` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// Ordered collection of product lines with unique IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == *id)
    }

    /// Add one unit of a product.
    ///
    /// An existing line for `id` gains one unit and keeps the name and price
    /// it was first added with. Otherwise a new line with quantity 1 is
    /// appended. Returns the line's quantity after the change.
    pub fn add_item(&mut self, id: ProductId, name: impl Into<String>, price: Price) -> Quantity {
        if let Some(line) = self.get_mut(id.as_str()) {
            line.qty = line.qty.increment();
            return line.qty;
        }
        self.lines.push(CartLine::new(id, name, price));
        Quantity::ONE
    }

    /// Set a line's quantity from text typed by the user.
    ///
    /// The text goes through [`Quantity::parse_lenient`]. The parse result is
    /// returned whether or not `id` is in the cart; an unknown `id` leaves
    /// the cart untouched.
    pub fn set_quantity(&mut self, id: &str, raw: &str) -> ParseOutcome<Quantity> {
        let outcome = Quantity::parse_lenient(raw);
        if let Some(line) = self.get_mut(id) {
            line.qty = *outcome.value();
        }
        outcome
    }

    /// Add one unit to an existing line. Returns `false` for an unknown `id`.
    pub fn increment(&mut self, id: &str) -> bool {
        self.get_mut(id).map(|line| line.qty = line.qty.increment()).is_some()
    }

    /// Remove one unit from an existing line, never going below 1.
    ///
    /// Returns `false` for an unknown `id`.
    pub fn decrement(&mut self, id: &str) -> bool {
        self.get_mut(id).map(|line| line.qty = line.qty.decrement()).is_some()
    }

    /// Delete a line. Returns the removed line, if any.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id == *id)?;
        Some(self.lines.remove(index))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `qty × price` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total number of units, shown on the cart badge.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty.get())).sum()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            match cart.get_mut(line.id.as_str()) {
                Some(existing) => {
                    existing.qty = Quantity::new(existing.qty.get().saturating_add(line.qty.get()))
                        .unwrap_or(existing.qty);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
