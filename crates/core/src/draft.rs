//! The editable, not-yet-persisted copy of a product.
//!
//! A [`Draft`] mirrors the product form: prices stay as typed text and
//! features may be raw comma-separated text until the draft is turned into a
//! [`ProductPayload`] for the store.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::types::{CategoryId, Product, ProductPayload};

/// Errors produced when a draft cannot be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A required field was left empty.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A price field is not a decimal number.
    #[error("{field} must be a number (got '{value}')")]
    InvalidPrice { field: &'static str, value: String },

    /// A price field is below zero.
    #[error("{0} cannot be negative")]
    NegativePrice(&'static str),

    /// A URL field is not an absolute URL.
    #[error("{field} must be a valid URL (got '{value}')")]
    InvalidUrl { field: &'static str, value: String },
}

/// Feature tags, either as typed text or as the normalized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Features {
    /// Comma-separated text as the user is typing it.
    Text(String),
    /// Normalized tags.
    List(Vec<String>),
}

impl Default for Features {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Features {
    /// Normalize into an ordered list of trimmed tags.
    ///
    /// A list is returned unchanged. Text is split on commas, each piece is
    /// trimmed, and pieces left empty are dropped.
    #[must_use]
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::List(tags) => tags.clone(),
            Self::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Text shown in the features input.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::List(tags) => tags.join(", "),
            Self::Text(text) => text.clone(),
        }
    }
}

/// One typed edit to a single draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    ShortDescription(String),
    Description(String),
    Price(String),
    OriginalPrice(String),
    ImageUrl(String),
    FileUrl(String),
    CategoryId(Option<CategoryId>),
    IsActive(bool),
    IsFeatured(bool),
    HasLiveDemo(bool),
    LiveDemoUrl(String),
    /// Raw comma-separated text from the features input.
    Features(String),
}

/// Local staging copy of a product's editable fields.
///
/// Optional text fields use the empty string for "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub price: String,
    pub original_price: String,
    pub image_url: String,
    pub file_url: String,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
    pub is_featured: bool,
    pub has_live_demo: bool,
    pub live_demo_url: String,
    pub features: Features,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            short_description: String::new(),
            description: String::new(),
            price: String::new(),
            original_price: String::new(),
            image_url: String::new(),
            file_url: String::new(),
            category_id: None,
            is_active: true,
            is_featured: false,
            has_live_demo: false,
            live_demo_url: String::new(),
            features: Features::default(),
        }
    }
}

impl Draft {
    /// Copy a stored product into a draft, absent optionals becoming `""`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            short_description: product.short_description.clone().unwrap_or_default(),
            description: product.description.clone(),
            price: product.price.to_string(),
            original_price: product
                .original_price
                .map(|price| price.to_string())
                .unwrap_or_default(),
            image_url: product.image_url.clone(),
            file_url: product.file_url.clone(),
            category_id: Some(product.category_id),
            is_active: product.is_active,
            is_featured: product.is_featured,
            has_live_demo: product.has_live_demo,
            live_demo_url: product.live_demo_url.clone().unwrap_or_default(),
            features: Features::List(product.features.clone()),
        }
    }

    /// Apply a single field edit.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(value) => self.name = value,
            FieldUpdate::ShortDescription(value) => self.short_description = value,
            FieldUpdate::Description(value) => self.description = value,
            FieldUpdate::Price(value) => self.price = value,
            FieldUpdate::OriginalPrice(value) => self.original_price = value,
            FieldUpdate::ImageUrl(value) => self.image_url = value,
            FieldUpdate::FileUrl(value) => self.file_url = value,
            FieldUpdate::CategoryId(value) => self.category_id = value,
            FieldUpdate::IsActive(value) => self.is_active = value,
            FieldUpdate::IsFeatured(value) => self.is_featured = value,
            FieldUpdate::HasLiveDemo(value) => self.has_live_demo = value,
            FieldUpdate::LiveDemoUrl(value) => self.live_demo_url = value,
            FieldUpdate::Features(value) => self.features = Features::Text(value),
        }
    }

    /// Build the payload sent to the store.
    ///
    /// Checks only what the form inputs constrain: required fields, numeric
    /// prices and absolute URLs. An empty original price becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found, checking fields in form order.
    pub fn to_payload(&self) -> Result<ProductPayload, DraftError> {
        let name = required(&self.name, "name")?;
        let description = required(&self.description, "description")?;
        let price = parse_price(required(&self.price, "price")?, "price")?;
        let original_price = optional(&self.original_price)
            .map(|value| parse_price(value, "original_price"))
            .transpose()?;
        let image_url = parse_url(required(&self.image_url, "image_url")?, "image_url")?;
        let file_url = parse_url(required(&self.file_url, "file_url")?, "file_url")?;
        let category_id = self.category_id.ok_or(DraftError::Missing("category_id"))?;
        let live_demo_url = optional(&self.live_demo_url)
            .map(|value| parse_url(value, "live_demo_url"))
            .transpose()?;

        Ok(ProductPayload {
            name: name.to_string(),
            short_description: optional(&self.short_description).map(ToString::to_string),
            description: description.to_string(),
            price,
            original_price,
            image_url,
            file_url,
            category_id,
            is_active: self.is_active,
            is_featured: self.is_featured,
            has_live_demo: self.has_live_demo,
            live_demo_url,
            features: self.features.normalize(),
        })
    }
}

fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, DraftError> {
    optional(value).ok_or(DraftError::Missing(field))
}

fn parse_price(value: &str, field: &'static str) -> Result<rust_decimal::Decimal, DraftError> {
    let price = Decimal::from_str(value).map_err(|_| DraftError::InvalidPrice {
        field,
        value: value.to_string(),
    })?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DraftError::NegativePrice(field));
    }
    Ok(price)
}

fn parse_url(value: &str, field: &'static str) -> Result<String, DraftError> {
    Url::parse(value)
        .map(|_| value.to_string())
        .map_err(|_| DraftError::InvalidUrl {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::ProductId;

    fn filled_draft() -> Draft {
        let mut draft = Draft::default();
        draft.apply(FieldUpdate::Name("X".to_string()));
        draft.apply(FieldUpdate::Description("An item".to_string()));
        draft.apply(FieldUpdate::Price("10".to_string()));
        draft.apply(FieldUpdate::ImageUrl("https://cdn.example.com/x.png".to_string()));
        draft.apply(FieldUpdate::FileUrl("https://cdn.example.com/x.zip".to_string()));
        draft.apply(FieldUpdate::CategoryId(Some(CategoryId::new(1))));
        draft
    }

    fn stored_product() -> Product {
        Product {
            id: ProductId::new(7),
            name: "Kit".to_string(),
            short_description: None,
            description: "Full kit".to_string(),
            price: Decimal::new(1999, 2),
            original_price: None,
            image_url: "https://cdn.example.com/kit.png".to_string(),
            file_url: "https://cdn.example.com/kit.zip".to_string(),
            category_id: CategoryId::new(2),
            is_active: false,
            is_featured: true,
            has_live_demo: false,
            live_demo_url: None,
            features: vec!["a".to_string(), "b".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_features_text_normalizes_to_trimmed_list() {
        let features = Features::Text("a, b , c".to_string());
        assert_eq!(features.normalize(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_features_normalize_is_idempotent() {
        let once = Features::Text(" x ,y".to_string()).normalize();
        let twice = Features::List(once.clone()).normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_features_drop_empty_pieces() {
        assert!(Features::Text(String::new()).normalize().is_empty());
        assert_eq!(Features::Text("a,,b,".to_string()).normalize(), vec!["a", "b"]);
    }

    #[test]
    fn test_features_display_joins_list() {
        let features = Features::List(vec!["Dark Mode".to_string(), "SEO".to_string()]);
        assert_eq!(features.display(), "Dark Mode, SEO");
        assert_eq!(Features::Text("a,b".to_string()).display(), "a,b");
    }

    #[test]
    fn test_default_draft_is_active_with_no_features() {
        let draft = Draft::default();
        assert!(draft.is_active);
        assert!(!draft.is_featured);
        assert_eq!(draft.features, Features::List(Vec::new()));
        assert_eq!(draft.category_id, None);
    }

    #[test]
    fn test_from_product_coerces_absent_optionals_to_empty() {
        let draft = Draft::from_product(&stored_product());
        assert_eq!(draft.short_description, "");
        assert_eq!(draft.original_price, "");
        assert_eq!(draft.live_demo_url, "");
        assert_eq!(draft.price, "19.99");
        assert_eq!(draft.category_id, Some(CategoryId::new(2)));
        assert!(!draft.is_active);
        assert_eq!(
            draft.features,
            Features::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_payload_converts_prices() {
        let mut draft = filled_draft();
        draft.apply(FieldUpdate::Price("12.5".to_string()));
        draft.apply(FieldUpdate::OriginalPrice(String::new()));

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.price, Decimal::new(125, 1));
        assert_eq!(payload.original_price, None);

        draft.apply(FieldUpdate::OriginalPrice("20".to_string()));
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.original_price, Some(Decimal::new(20, 0)));
    }

    #[test]
    fn test_payload_round_trips_stored_product() {
        let product = stored_product();
        let payload = Draft::from_product(&product).to_payload().unwrap();
        assert_eq!(payload.price, product.price);
        assert_eq!(payload.features, product.features);
        assert_eq!(payload.short_description, None);
        assert_eq!(payload.category_id, product.category_id);
    }

    #[test]
    fn test_payload_requires_fields() {
        let draft = Draft::default();
        assert_eq!(draft.to_payload(), Err(DraftError::Missing("name")));

        let mut draft = filled_draft();
        draft.apply(FieldUpdate::CategoryId(None));
        assert_eq!(draft.to_payload(), Err(DraftError::Missing("category_id")));
    }

    #[test]
    fn test_payload_rejects_bad_numbers_and_urls() {
        let mut draft = filled_draft();
        draft.apply(FieldUpdate::Price("ten".to_string()));
        assert!(matches!(
            draft.to_payload(),
            Err(DraftError::InvalidPrice { field: "price", .. })
        ));

        let mut draft = filled_draft();
        draft.apply(FieldUpdate::Price("-1".to_string()));
        assert_eq!(draft.to_payload(), Err(DraftError::NegativePrice("price")));

        let mut draft = filled_draft();
        draft.apply(FieldUpdate::FileUrl("not a url".to_string()));
        assert!(matches!(
            draft.to_payload(),
            Err(DraftError::InvalidUrl { field: "file_url", .. })
        ));
    }

    #[test]
    fn test_live_demo_url_not_required_when_flag_set() {
        let mut draft = filled_draft();
        draft.apply(FieldUpdate::HasLiveDemo(true));

        let payload = draft.to_payload().unwrap();
        assert!(payload.has_live_demo);
        assert_eq!(payload.live_demo_url, None);
    }
}
