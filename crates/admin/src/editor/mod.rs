//! Product editor view-model.
//!
//! Mediates between the remote record store and a bound product form. The
//! editor holds the last fetched snapshot of products and categories, one
//! [`Draft`], and at most one product being edited. Every successful write
//! is followed by a full reload of the product list; nothing is patched
//! locally.
//!
//! # Modes
//!
//! ```text
//! Idle ──edit(product)──▶ Editing(id)
//!  ▲                          │
//!  └── successful submit ─────┤
//!  └── cancel ────────────────┘
//! ```
//!
//! Store failures never escape as errors: they become [`Notice`]s for the
//! surface to show, and the draft is left untouched so the user can retry.

use catalog_admin_core::{Category, Draft, FieldUpdate, Product, ProductId};
use tracing::instrument;

use crate::store::ProductStore;

/// Prompt passed to the confirmation callback before a delete.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this notice reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Whether a product is currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Editing(ProductId),
}

/// View-model for the product form and list.
#[derive(Debug, Default)]
pub struct ProductEditor {
    products: Vec<Product>,
    categories: Vec<Category>,
    draft: Draft,
    editing: Option<ProductId>,
    loading: bool,
    notices: Vec<Notice>,
}

impl ProductEditor {
    /// Create an editor with an empty draft and no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor and fetch products and categories.
    pub async fn mount<S: ProductStore>(store: &S) -> Self {
        let mut editor = Self::new();
        editor.load(store).await;
        editor
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Products from the last successful fetch, newest first.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Categories from the last successful fetch.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The draft bound to the form.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Identity of the product being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<ProductId> {
        self.editing
    }

    /// Current editing mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        match self.editing {
            Some(id) => EditorMode::Editing(id),
            None => EditorMode::Idle,
        }
    }

    /// True while a save is in flight; the submit control is disabled.
    ///
    /// `submit` holds `&mut self` for the whole save, so only a surface that
    /// shares the editor across tasks (behind a lock it polls) observes it.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Notices not yet shown.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Replace the product list with a fresh snapshot.
    ///
    /// On failure the previous list is kept and an error notice is queued.
    #[instrument(skip(self, store))]
    pub async fn load_products<S: ProductStore>(&mut self, store: &S) {
        let result = store.list_products().await;
        self.apply_products(result);
    }

    /// Replace the category list with a fresh snapshot.
    ///
    /// On failure the previous list is kept and an error notice is queued.
    #[instrument(skip(self, store))]
    pub async fn load_categories<S: ProductStore>(&mut self, store: &S) {
        let result = store.list_categories().await;
        self.apply_categories(result);
    }

    /// Fetch products and categories concurrently.
    #[instrument(skip(self, store))]
    pub async fn load<S: ProductStore>(&mut self, store: &S) {
        let (products, categories) = tokio::join!(store.list_products(), store.list_categories());
        self.apply_products(products);
        self.apply_categories(categories);
    }

    fn apply_products(&mut self, result: Result<Vec<Product>, crate::store::StoreError>) {
        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Product list replaced");
                self.products = products;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products, keeping previous list");
                self.notices
                    .push(Notice::error(format!("Error loading products: {e}")));
            }
        }
    }

    fn apply_categories(&mut self, result: Result<Vec<Category>, crate::store::StoreError>) {
        match result {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories, keeping previous list");
                self.notices
                    .push(Notice::error(format!("Error loading categories: {e}")));
            }
        }
    }

    // =========================================================================
    // Local transitions
    // =========================================================================

    /// Apply one typed edit to the draft.
    pub fn update_field(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
    }

    /// Start editing `product`, overwriting the draft with its fields.
    pub fn edit(&mut self, product: &Product) {
        tracing::debug!(product_id = %product.id, "Editing product");
        self.draft = Draft::from_product(product);
        self.editing = Some(product.id);
    }

    /// Start editing the loaded product with `id`.
    ///
    /// Returns `false` and queues an error notice if it is not in the list.
    pub fn edit_by_id(&mut self, id: ProductId) -> bool {
        match self.products.iter().find(|product| product.id == id).cloned() {
            Some(product) => {
                self.edit(&product);
                true
            }
            None => {
                self.notices
                    .push(Notice::error(format!("Product {id} not found")));
                false
            }
        }
    }

    /// Discard the draft and stop editing without contacting the store.
    pub fn cancel(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Save the draft: update the edited product, or insert a new one.
    ///
    /// Returns `true` if the store accepted the write. On success the draft
    /// is reset, editing ends and the product list is reloaded. On failure
    /// the draft and editing reference are kept.
    #[instrument(skip(self, store))]
    pub async fn submit<S: ProductStore>(&mut self, store: &S) -> bool {
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::info!(error = %e, "Draft rejected");
                self.notices
                    .push(Notice::error(format!("Error saving product: {e}")));
                return false;
            }
        };

        self.loading = true;
        let result = match self.editing {
            Some(id) => store.update_product(id, &payload).await,
            None => store.insert_product(&payload).await,
        };
        self.loading = false;

        match result {
            Ok(()) => {
                let message = if self.editing.is_some() {
                    "Product updated successfully!"
                } else {
                    "Product created successfully!"
                };
                tracing::info!(name = %payload.name, "{message}");
                self.cancel();
                self.notices.push(Notice::success(message));
                self.load_products(store).await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save product");
                self.notices
                    .push(Notice::error(format!("Error saving product: {e}")));
                false
            }
        }
    }

    /// Delete the product with `id` once `confirm` agrees.
    ///
    /// `confirm` receives [`DELETE_PROMPT`]. Declining makes no store call.
    /// Like a successful submit, a successful delete resets the draft and
    /// ends editing. Returns `true` if the store deleted the product.
    #[instrument(skip(self, store, confirm), fields(product_id = %id))]
    pub async fn delete_product<S, F>(&mut self, store: &S, id: ProductId, confirm: F) -> bool
    where
        S: ProductStore,
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            tracing::debug!("Delete declined");
            return false;
        }

        match store.delete_product(id).await {
            Ok(()) => {
                tracing::info!("Product deleted");
                self.cancel();
                self.notices
                    .push(Notice::success("Product deleted successfully!"));
                self.load_products(store).await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete product");
                self.notices
                    .push(Notice::error(format!("Error deleting product: {e}")));
                false
            }
        }
    }
}
