//! Chain store error types.

use thiserror::Error;

/// Errors from chain store operations.
///
/// An existing store file that cannot be opened or migrated surfaces
/// here rather than being treated as empty history — callers must not
/// conflate corruption with a fresh install.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
