//! Product commands: list, create, update, delete.

use std::io::{self, BufRead, Write};

use catalog_admin::{AppError, Notice, ProductEditor, ProductStore};
use catalog_admin_core::{CategoryId, FieldUpdate, ProductCounts, ProductId};
use clap::Args;

/// Product form fields. Only the given ones are applied to the draft.
#[derive(Debug, Default, Args)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Brief description for cards
    #[arg(long)]
    pub short_description: Option<String>,

    /// Detailed product description
    #[arg(long)]
    pub description: Option<String>,

    /// Price in dollars
    #[arg(long)]
    pub price: Option<String>,

    /// Original price in dollars (pass "" to clear)
    #[arg(long)]
    pub original_price: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Downloadable file URL
    #[arg(long)]
    pub file_url: Option<String>,

    /// Category ID
    #[arg(long)]
    pub category: Option<CategoryId>,

    /// Features, comma separated
    #[arg(long)]
    pub features: Option<String>,

    /// Whether the product is listed
    #[arg(long)]
    pub active: Option<bool>,

    /// Whether the product is featured
    #[arg(long)]
    pub featured: Option<bool>,

    /// Whether the product has a live demo
    #[arg(long)]
    pub live_demo: Option<bool>,

    /// Live demo URL
    #[arg(long)]
    pub live_demo_url: Option<String>,
}

impl ProductFields {
    /// Field updates for every option that was given, in form order.
    pub fn updates(&self) -> Vec<FieldUpdate> {
        let text = |value: &Option<String>, update: fn(String) -> FieldUpdate| {
            value.clone().map(update)
        };

        [
            text(&self.name, FieldUpdate::Name),
            text(&self.short_description, FieldUpdate::ShortDescription),
            text(&self.description, FieldUpdate::Description),
            text(&self.price, FieldUpdate::Price),
            text(&self.original_price, FieldUpdate::OriginalPrice),
            text(&self.image_url, FieldUpdate::ImageUrl),
            text(&self.file_url, FieldUpdate::FileUrl),
            self.category.map(|id| FieldUpdate::CategoryId(Some(id))),
            text(&self.features, FieldUpdate::Features),
            self.active.map(FieldUpdate::IsActive),
            self.featured.map(FieldUpdate::IsFeatured),
            self.live_demo.map(FieldUpdate::HasLiveDemo),
            text(&self.live_demo_url, FieldUpdate::LiveDemoUrl),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Log every product, newest first.
pub async fn list<S: ProductStore>(store: &S) -> Result<(), AppError> {
    let mut editor = ProductEditor::new();
    editor.load_products(store).await;

    for product in editor.products() {
        tracing::info!(
            id = %product.id,
            price = %format!("${}", product.price),
            active = product.is_active,
            featured = product.is_featured,
            "{}",
            product.name
        );
    }
    let counts: ProductCounts = editor.products().iter().collect();
    tracing::info!(
        active = counts.active,
        featured = counts.featured,
        free = counts.free,
        "Products ({})",
        counts.total
    );

    let loaded = !editor.notices().iter().any(Notice::is_error);
    super::finish(&mut editor, loaded)
}

/// Create a product from the given fields.
pub async fn create<S: ProductStore>(store: &S, fields: &ProductFields) -> Result<(), AppError> {
    let mut editor = ProductEditor::new();
    for update in fields.updates() {
        editor.update_field(update);
    }

    let saved = editor.submit(store).await;
    super::finish(&mut editor, saved)
}

/// Apply the given fields on top of product `id` and save it.
pub async fn update<S: ProductStore>(
    store: &S,
    id: ProductId,
    fields: &ProductFields,
) -> Result<(), AppError> {
    let mut editor = ProductEditor::new();
    editor.load_products(store).await;
    if !editor.edit_by_id(id) {
        return super::finish(&mut editor, false);
    }

    for update in fields.updates() {
        editor.update_field(update);
    }

    let saved = editor.submit(store).await;
    super::finish(&mut editor, saved)
}

/// Delete product `id`, asking on stdin unless `yes` is set.
pub async fn delete<S: ProductStore>(store: &S, id: ProductId, yes: bool) -> Result<(), AppError> {
    let mut editor = ProductEditor::new();
    let deleted = editor
        .delete_product(store, id, |prompt| yes || confirm_on_stdin(prompt))
        .await;
    super::finish(&mut editor, deleted)
}

/// Ask a yes/no question on the terminal. Anything but "y"/"yes" declines.
fn confirm_on_stdin(prompt: &str) -> bool {
    let mut stderr = io::stderr();
    if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
