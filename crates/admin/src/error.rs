//! Unified error handling for admin surfaces.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the admin console.
///
/// Editor operations report store failures as notices; this type covers
/// failures that stop a surface from running at all.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store client could not be built.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The operation ran but the store or the draft rejected it.
    #[error("Operation failed: {0}")]
    Failed(String),
}
