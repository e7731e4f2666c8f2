//! Persistent key-value storage.
//!
//! The storefront keeps all visitor state as string values under fixed keys,
//! the same shape as browser local storage:
//!
//! - `cartItems` - the serialized cart (owned by [`CartRepository`](crate::services::CartRepository))
//! - `contactRequests` - appended contact requests (owned by [`ContactLog`](crate::services::ContactLog))
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local, lost on restart (default)
//! - [`JsonFileStore`] - a single JSON object on disk, shared with `corner-shop-cli`
//!
//! Each call is atomic on its own. Read-modify-write sequences spanning
//! several calls are serialized by the owners of the keys, not by the store.

use std::path::PathBuf;

use thiserror::Error;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized before writing.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Another thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// A durable string-to-string map.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
