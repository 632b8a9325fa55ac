//! Catalog Admin Core - Shared types library.
//!
//! This crate provides the types used across the catalog admin components:
//! - `admin` - Store client and the product editor view-model
//! - `cli` - Command-line surface driving the editor
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no HTTP
//! clients. Everything here can be exercised without a running store.
//!
//! # Modules
//!
//! - [`types`] - Record identities, products and categories as the store holds them
//! - [`draft`] - The editable form copy of a product and its normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod draft;
pub mod types;

pub use draft::{Draft, DraftError, Features, FieldUpdate};
pub use types::*;
