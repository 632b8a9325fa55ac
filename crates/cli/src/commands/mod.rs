//! Subcommand implementations.
//!
//! Each command drives a [`catalog_admin::ProductEditor`] against the store
//! and reports the editor's notices through `tracing`.

pub mod categories;
pub mod products;

use catalog_admin::{AppError, NoticeLevel, ProductEditor};

/// Log pending notices and turn a failed operation into an error.
///
/// An operation that did nothing without reporting an error (a declined
/// delete) is not a failure.
pub fn finish(editor: &mut ProductEditor, succeeded: bool) -> Result<(), AppError> {
    let notices = editor.take_notices();
    for notice in &notices {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }

    if succeeded {
        return Ok(());
    }

    match notices.into_iter().rev().find(catalog_admin::Notice::is_error) {
        Some(notice) => Err(AppError::Failed(notice.message)),
        None => {
            tracing::info!("Nothing changed");
            Ok(())
        }
    }
}
