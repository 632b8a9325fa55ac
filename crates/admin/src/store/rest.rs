//! REST client for the hosted record store.
//!
//! # API Reference
//!
//! - Base URL: `{project}/rest/v1/{collection}`
//! - Authentication: service key via both `apikey: <key>` and
//!   `Authorization: Bearer <key>`
//! - Filters are query parameters (`id=eq.7`), ordering via `order=column.desc`
//! - Errors are JSON bodies of the form `{code, message, details, hint}`

use std::sync::Arc;

use catalog_admin_core::{Category, Product, ProductId, ProductPayload};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use super::{ProductStore, StoreError};
use crate::config::StoreConfig;

const PRODUCTS: &str = "products";
const CATEGORIES: &str = "categories";

/// Error body returned by the store.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// REST client for the hosted record store.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct RestStore {
    inner: Arc<RestStoreInner>,
}

struct RestStoreInner {
    client: reqwest::Client,
    products_url: String,
    categories_url: String,
}

impl RestStore {
    /// Create a new store client.
    ///
    /// # Errors
    ///
    /// Returns error if the key cannot be used as a header or the HTTP
    /// client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let key = config.key.expose_secret();
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|e| StoreError::Parse(format!("Invalid store key format: {e}")))?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| StoreError::Parse(format!("Invalid store key format: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert("Authorization", bearer);

        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestStoreInner {
                client,
                products_url: config.collection_url(PRODUCTS),
                categories_url: config.collection_url(CATEGORIES),
            }),
        })
    }

    /// All products, newest first.
    fn products_list_url(&self) -> String {
        format!("{}?select=*&order=created_at.desc", self.inner.products_url)
    }

    fn categories_list_url(&self) -> String {
        format!("{}?select=*", self.inner.categories_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}?id=eq.{id}", self.inner.products_url)
    }

    /// Handle a response whose body is a JSON array of rows.
    async fn rows<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, StoreError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| StoreError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Handle a response to a write, which carries no body on success.
    async fn empty(response: reqwest::Response) -> Result<(), StoreError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse an error response from the store.
    async fn parse_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return StoreError::RateLimited(retry_after);
        }

        if status == 401 || status == 403 {
            return StoreError::Unauthorized;
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        StoreError::Api {
            status,
            message: error_message(&body),
        }
    }
}

/// Reduce an error body to the store's message, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.trim().to_string())
}

impl ProductStore for RestStore {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.products_list_url())
            .send()
            .await?;
        let products: Vec<Product> = Self::rows(response).await?;
        tracing::debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.categories_list_url())
            .send()
            .await?;
        let categories: Vec<Category> = Self::rows(response).await?;
        tracing::debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn insert_product(&self, payload: &ProductPayload) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .post(&self.inner.products_url)
            .header("Prefer", "return=minimal")
            .json(&[payload])
            .send()
            .await?;
        Self::empty(response).await
    }

    #[instrument(skip(self, payload), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .patch(self.product_url(id))
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await?;
        Self::empty(response).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(self.product_url(id))
            .send()
            .await?;
        Self::empty(response).await
    }
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("products_url", &self.inner.products_url)
            .field("categories_url", &self.inner.categories_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;
    use url::Url;

    use super::*;

    fn store() -> RestStore {
        RestStore::new(&StoreConfig {
            url: Url::parse("https://abc.supabase.co").unwrap(),
            key: SecretString::from("sb_secret_9fQ2kLm7xT"),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_error_message_prefers_store_message() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value"}"#;
        assert_eq!(error_message(body), "duplicate key value");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("gateway timeout\n"), "gateway timeout");
        assert_eq!(error_message(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_product_url_filters_by_id() {
        assert_eq!(
            store().product_url(ProductId::new(7)),
            "https://abc.supabase.co/rest/v1/products?id=eq.7"
        );
    }

    #[test]
    fn test_products_listed_newest_first() {
        assert_eq!(
            store().products_list_url(),
            "https://abc.supabase.co/rest/v1/products?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn test_categories_listed_unordered() {
        assert_eq!(
            store().categories_list_url(),
            "https://abc.supabase.co/rest/v1/categories?select=*"
        );
    }

    #[test]
    fn test_debug_omits_key() {
        let debug_output = format!("{:?}", store());
        assert!(debug_output.contains("rest/v1/categories"));
        assert!(!debug_output.contains("sb_secret_9fQ2kLm7xT"));
    }
}
