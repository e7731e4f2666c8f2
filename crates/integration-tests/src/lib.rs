//! Integration tests for Corner Shop.
//!
//! The tests drive the complete storefront router (routes, templates and
//! middleware) in process with `tower::ServiceExt::oneshot`, backed by an
//! in-memory store they can inspect and seed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Shop page, cart operations and the header badge
//! - `contact_form` - Contact form validation and the request log

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use corner_shop_storefront::{
    catalog::Catalog,
    config::StorefrontConfig,
    routes,
    state::AppState,
    store::{KeyValueStore, MemoryStore},
};
use tower::ServiceExt;

/// A storefront app wired to a store the test can reach.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    app: Router,
}

/// Status, headers and body text of one response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// A response header as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestContext {
    /// App with an empty store and the demo catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// App over an existing (possibly pre-seeded) store.
    #[must_use]
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let config = StorefrontConfig {
            static_dir: static_dir(),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, store.clone(), Catalog::demo());

        Self {
            store,
            app: routes::app(state),
        }
    }

    /// App whose store already holds `value` under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the memory store rejects the write.
    #[must_use]
    pub fn seeded(key: &str, value: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        store.set(key, value).expect("seed store");
        Self::with_store(store)
    }

    /// Raw stored value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the memory store fails to read.
    #[must_use]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).expect("read store")
    }

    /// Stored value for `key`, parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the value is not JSON.
    #[must_use]
    pub fn stored_json(&self, key: &str) -> serde_json::Value {
        let raw = self.stored(key).expect("key present");
        serde_json::from_str(&raw).expect("stored JSON")
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        self.send(request).await
    }

    /// Send a POST with a URL-encoded form body, as HTMX does.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("HX-Request", "true")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}
