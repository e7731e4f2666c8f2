//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::services::{CartRepository, ContactLog};
use crate::store::KeyValueStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart and the contact log
/// each sit behind an async mutex: a handler holds the lock for its whole
/// load-change-save cycle, so concurrent requests never interleave writes.
///
/// Store backends do synchronous I/O (the file store reads and renames on
/// every call), so [`Self::with_carts`] and [`Self::with_contacts`] run the
/// work on tokio's blocking pool while the lock is held.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: Mutex<CartRepository>,
    contacts: Mutex<ContactLog>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Persistent store shared by the cart and the contact log
    /// * `catalog` - Products shown on the shop page
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn KeyValueStore>, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts: Mutex::new(CartRepository::new(store.clone())),
                contacts: Mutex::new(ContactLog::new(store)),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The cart repository. Lock it for the duration of one operation.
    #[must_use]
    pub fn carts(&self) -> &Mutex<CartRepository> {
        &self.inner.carts
    }

    /// The contact request log. Lock it for the duration of one append.
    #[must_use]
    pub fn contacts(&self) -> &Mutex<ContactLog> {
        &self.inner.contacts
    }

    /// Run `op` against the cart repository on the blocking pool, holding
    /// the cart lock until it finishes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Task` if the blocking task panicked or was
    /// cancelled. Store errors are part of `T` and left to the caller.
    pub async fn with_carts<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&CartRepository) -> T + Send + 'static,
        T: Send + 'static,
    {
        let guard = self.carts().lock().await;
        let repo = guard.clone();
        let out = tokio::task::spawn_blocking(move || op(&repo)).await?;
        drop(guard);
        Ok(out)
    }

    /// Run `op` against the contact log on the blocking pool, holding the
    /// contact lock until it finishes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Task` if the blocking task panicked or was
    /// cancelled.
    pub async fn with_contacts<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&ContactLog) -> T + Send + 'static,
        T: Send + 'static,
    {
        let guard = self.contacts().lock().await;
        let log = guard.clone();
        let out = tokio::task::spawn_blocking(move || op(&log)).await?;
        drop(guard);
        Ok(out)
    }

    /// Current number of units in the cart, for the header badge.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Task` if the blocking read could not complete.
    pub async fn cart_count(&self) -> Result<u64> {
        self.with_carts(|carts| carts.load().count()).await
    }
}
