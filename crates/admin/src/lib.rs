//! Catalog Admin library.
//!
//! This crate provides the product catalog admin functionality as a library,
//! allowing it to be tested and driven from any surface.
//!
//! # Security
//!
//! The store key configured here grants write access to every product.
//! Never log it and never ship it to a browser.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`editor`] - Product editor view-model
//! - [`error`] - Error type for surfaces
//! - [`store`] - Record store boundary and REST client

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod editor;
pub mod error;
pub mod store;

pub use config::{AdminConfig, ConfigError, StoreConfig};
pub use editor::{DELETE_PROMPT, EditorMode, Notice, NoticeLevel, ProductEditor};
pub use error::AppError;
pub use store::{ProductStore, RestStore, StoreError};
