//! Boundary to the external record store.
//!
//! The store owns every product and category; the admin console only ever
//! reads full snapshots and issues single-record writes. [`ProductStore`] is
//! the seam the editor is written against, and [`RestStore`] implements it
//! over the hosted database's REST interface.
//!
//! # Collections
//!
//! - `products` - read ordered by `created_at` descending; insert, update and
//!   delete keyed by `id`
//! - `categories` - read only

mod rest;

pub use rest::RestStore;

use std::future::Future;

use catalog_admin_core::{Category, Product, ProductId, ProductPayload};
use thiserror::Error;

/// Errors reported by the store or the transport to it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Unauthorized (invalid or expired key).
    #[error("Unauthorized: invalid store key")]
    Unauthorized,

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Query interface of the record store as used by the product editor.
pub trait ProductStore {
    /// All products, newest first.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send;

    /// All categories in store order.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;

    /// Insert one new product.
    fn insert_product(
        &self,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace every editable field of the product with `id`.
    fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete the product with `id`.
    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), StoreError>> + Send;
}
