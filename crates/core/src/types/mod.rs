//! Core types for the catalog.
//!
//! Products and categories are owned by the external store; these types are
//! the snapshots read from it and the payloads written back.

pub mod category;
pub mod id;
pub mod product;

pub use category::Category;
pub use id::*;
pub use product::{Product, ProductCounts, ProductPayload};
