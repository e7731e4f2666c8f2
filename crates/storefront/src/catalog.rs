//! Product catalog shown on the shop page.
//!
//! The catalog only feeds the product cards. Once a product is in a cart, the
//! cart keeps the name and price it was added with.

use std::path::Path;

use corner_shop_core::{Price, Product};
use thiserror::Error;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),
}

/// Products in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting repeated product IDs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            if products.iter().skip(i + 1).any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id.to_string()));
            }
        }
        Ok(Self { products })
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            products: vec![
                Product::new("mug", "Ceramic Mug", Price::from_units(500))
                    .with_description("Hand-glazed, 350 ml."),
                Product::new("teapot", "Cast Iron Teapot", Price::from_units(3_200))
                    .with_description("Keeps tea hot for an hour."),
                Product::new("tea-green", "Green Tea, 100 g", Price::from_units(450)),
                Product::new("tea-black", "Black Tea, 100 g", Price::from_units(390)),
                Product::new("tray", "Bamboo Tray", Price::from_units(1_250))
                    .with_description("Folding serving tray."),
                Product::new("set", "Tea Ceremony Set", Price::from_units(12_900))
                    .with_description("Teapot, four cups and a tray."),
            ],
        }
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// repeats a product ID.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&contents)?;
        tracing::info!(path = %path.display(), count = products.len(), "Loaded catalog");
        Self::new(products)
    }

    /// Load from `path` if given, otherwise use the demo catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given and cannot be loaded.
    pub fn load_or_demo(path: Option<&Path>) -> Result<Self, CatalogError> {
        path.map_or_else(|| Ok(Self::demo()), Self::load)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}
