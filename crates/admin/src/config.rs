//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_STORE_URL` - Base URL of the hosted database project
//!   (falls back to `SUPABASE_URL`)
//! - `CATALOG_STORE_KEY` - Service key for the store's REST interface
//!   (falls back to `SUPABASE_SERVICE_ROLE_KEY`)
//!
//! ## Optional
//! - `CATALOG_STORE_TIMEOUT_SECS` - Per-request timeout (default: 30)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Hosted record store configuration
    pub store: StoreConfig,
}

/// Connection settings for the hosted record store.
///
/// Implements `Debug` manually to redact the service key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Project base URL (e.g., <https://abc.supabase.co>)
    pub url: Url,
    /// Service key sent as `apikey` and bearer token
    pub key: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url.as_str())
            .field("key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the service key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            store: StoreConfig::from_env()?,
        })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_env_with_fallback("CATALOG_STORE_URL", "SUPABASE_URL")?;
        let url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_STORE_URL".to_string(), e.to_string()))?;

        let key = SecretString::from(get_env_with_fallback(
            "CATALOG_STORE_KEY",
            "SUPABASE_SERVICE_ROLE_KEY",
        )?);
        validate_secret(&key, "CATALOG_STORE_KEY")?;

        let timeout_secs = get_env_or_default(
            "CATALOG_STORE_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_STORE_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            url,
            key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Returns the REST endpoint for a named collection.
    #[must_use]
    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/rest/v1/{collection}",
            self.url.as_str().trim_end_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable, trying a fallback name second.
fn get_env_with_fallback(primary_key: &str, fallback_key: &str) -> Result<String, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var(fallback_key))
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject empty keys and obvious placeholders.
fn validate_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.trim().is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
