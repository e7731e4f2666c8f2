//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `SHOP_STORE_PATH` - JSON file holding the cart and contact requests
//!   (default: in-memory, lost on restart)
//! - `SHOP_CATALOG_PATH` - JSON array of products (default: built-in demo catalog)
//! - `SHOP_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where visitor state is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Keep everything in process memory.
    #[default]
    Memory,
    /// Keep everything in a JSON file.
    File(PathBuf),
}

impl StoreBackend {
    /// Open the configured store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file store's directory cannot be created.
    pub fn open(&self) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        match self {
            Self::Memory => Ok(Arc::new(MemoryStore::new())),
            Self::File(path) => Ok(Arc::new(JsonFileStore::open(path)?)),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Persistent store backend
    pub store: StoreBackend,
    /// Optional catalog file replacing the demo catalog
    pub catalog_path: Option<PathBuf>,
    /// Directory of static assets
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            store: StoreBackend::Memory,
            catalog_path: None,
            static_dir: PathBuf::from("crates/storefront/static"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("SHOP_HOST").map_or(Ok(defaults.host), |v| parse_var("SHOP_HOST", &v))?;
        let port = get("SHOP_PORT").map_or(Ok(defaults.port), |v| parse_var("SHOP_PORT", &v))?;
        let store = get("SHOP_STORE_PATH").map_or(StoreBackend::Memory, |path| {
            StoreBackend::File(PathBuf::from(path))
        });
        let catalog_path = get("SHOP_CATALOG_PATH").map(PathBuf::from);
        let static_dir = get("SHOP_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        let sentry_sample_rate = get("SENTRY_SAMPLE_RATE")
            .map_or(Ok(defaults.sentry_sample_rate), |v| {
                parse_rate("SENTRY_SAMPLE_RATE", &v)
            })?;
        let sentry_traces_sample_rate = get("SENTRY_TRACES_SAMPLE_RATE")
            .map_or(Ok(defaults.sentry_traces_sample_rate), |v| {
                parse_rate("SENTRY_TRACES_SAMPLE_RATE", &v)
            })?;

        Ok(Self {
            host,
            port,
            store,
            catalog_path,
            static_dir,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate, which must lie in 0.0..=1.0.
fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_var(key, value)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
