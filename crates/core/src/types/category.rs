//! Category records, read-only from the admin console's point of view.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A row of the `categories` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
}
