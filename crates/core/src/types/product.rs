//! Product records as stored in the `products` collection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CategoryId, ProductId};

/// A product row, read wholesale from the store.
///
/// The store assigns `id` and `created_at`; everything else is editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    pub description: String,
    pub price: Decimal,
    /// Conventionally at least `price`, but not enforced.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub image_url: String,
    pub file_url: String,
    pub category_id: CategoryId,
    pub is_active: bool,
    pub is_featured: bool,
    pub has_live_demo: bool,
    #[serde(default)]
    pub live_demo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is given away (price of exactly zero).
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

/// Headline counts over a product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductCounts {
    pub total: usize,
    pub active: usize,
    pub featured: usize,
    pub free: usize,
}

impl<'a> FromIterator<&'a Product> for ProductCounts {
    fn from_iter<I: IntoIterator<Item = &'a Product>>(products: I) -> Self {
        products.into_iter().fold(Self::default(), |mut counts, product| {
            counts.total += 1;
            counts.active += usize::from(product.is_active);
            counts.featured += usize::from(product.is_featured);
            counts.free += usize::from(product.is_free());
            counts
        })
    }
}

/// The write shape of a product: every editable field, no identity.
///
/// Sent as the body of both insert and update. Absent optionals serialize
/// as `null` so an update replaces the whole record rather than patching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub short_description: Option<String>,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub image_url: String,
    pub file_url: String,
    pub category_id: CategoryId,
    pub is_active: bool,
    pub is_featured: bool,
    pub has_live_demo: bool,
    pub live_demo_url: Option<String>,
    pub features: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
