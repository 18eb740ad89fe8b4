//! Storage location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_audit_db_file() -> String {
    "workaudit_audit.db".to_string()
}

fn default_forward_file() -> String {
    "audit_forward/audit.jsonl".to_string()
}

/// Where the audit subsystem keeps its two sinks.
///
/// Both paths resolve relative to `base_dir`; an empty `base_dir` means
/// "use the platform data directory" (`<data_dir>/workaudit/`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Installation base directory. Empty = platform default.
    #[serde(default)]
    pub base_dir: String,

    /// Chain store database file, relative to `base_dir`.
    #[serde(default = "default_audit_db_file")]
    pub audit_db_file: String,

    /// Forward sink JSONL file, relative to `base_dir`.
    #[serde(default = "default_forward_file")]
    pub forward_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: String::new(),
            audit_db_file: default_audit_db_file(),
            forward_file: default_forward_file(),
        }
    }
}

impl StorageConfig {
    /// Resolve the installation base directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] if `base_dir` is empty and the
    /// platform provides no data directory.
    pub fn resolved_base_dir(&self) -> Result<PathBuf, ConfigError> {
        if !self.base_dir.is_empty() {
            return Ok(PathBuf::from(&self.base_dir));
        }
        dirs::data_dir()
            .map(|p| p.join("workaudit"))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Absolute path of the chain store database file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] if no base directory resolves.
    pub fn audit_db_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.resolved_base_dir()?.join(&self.audit_db_file))
    }

    /// Absolute path of the forward sink JSONL file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] if no base directory resolves.
    pub fn forward_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.resolved_base_dir()?.join(&self.forward_file))
    }
}
