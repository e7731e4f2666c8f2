//! Contact request log.
//!
//! Validated requests are appended to a JSON array under a fixed key. The
//! storefront never reads the requests back for display; somebody handles
//! them out of band.

use std::sync::Arc;

use corner_shop_core::ContactRequest;

use crate::store::{KeyValueStore, StoreError};

/// Store key holding the array of contact requests.
pub const CONTACT_REQUESTS_KEY: &str = "contactRequests";

/// Append-only log of contact requests.
#[derive(Clone)]
pub struct ContactLog {
    store: Arc<dyn KeyValueStore>,
}

impl ContactLog {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Append a request and return the number of requests now logged.
    ///
    /// Entries already in the log are kept as-is, whatever their shape. A
    /// log that is not a JSON array, or a store that cannot be read, starts a
    /// new log, the same way an unreadable cart reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn append(&self, request: &ContactRequest) -> Result<usize, StoreError> {
        let mut entries = match self.store.get(CONTACT_REQUESTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<serde_json::Value>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Contact request log is malformed, starting a new one");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read contact request log, starting a new one");
                Vec::new()
            }
        };

        entries.push(serde_json::to_value(request)?);
        self.store
            .set(CONTACT_REQUESTS_KEY, &serde_json::to_string(&entries)?)?;

        tracing::info!(total = entries.len(), "Contact request recorded");
        Ok(entries.len())
    }
}
