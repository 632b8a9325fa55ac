//! Category listing.

use catalog_admin::{Notice, ProductEditor, ProductStore};

/// Log every category, the options offered for a product's category.
pub async fn list<S: ProductStore>(store: &S) -> Result<(), catalog_admin::AppError> {
    let mut editor = ProductEditor::new();
    editor.load_categories(store).await;

    for category in editor.categories() {
        tracing::info!(
            id = %category.id,
            slug = %category.slug,
            description = category.description.as_deref().unwrap_or(""),
            "{}",
            category.name
        );
    }
    tracing::info!("{} categories", editor.categories().len());

    let loaded = !editor.notices().iter().any(Notice::is_error);
    super::finish(&mut editor, loaded)
}
