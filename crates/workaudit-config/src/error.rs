//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// No platform data directory could be resolved and none was configured.
    #[error("No data directory available; set storage.base_dir explicitly")]
    NoDataDir,
}
