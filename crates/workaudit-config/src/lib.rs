//! # workaudit-config
//!
//! Layered configuration loading for WorkAudit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WORKAUDIT_*` prefix, `__` as separator)
//! 2. Installation-level `.workaudit/config.toml`
//! 3. User-level `~/.config/workaudit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WORKAUDIT_STORAGE__BASE_DIR` -> `storage.base_dir`,
//! `WORKAUDIT_STORAGE__AUDIT_DB_FILE` -> `storage.audit_db_file`, etc.
//! The `__` (double underscore) separates nested config sections.

mod error;
mod storage;

pub use error::ConfigError;
pub use storage::StorageConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkAuditConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl WorkAuditConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".workaudit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("WORKAUDIT_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("workaudit").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: WorkAuditConfig = WorkAuditConfig::figment().extract()?;
            assert_eq!(config.storage.audit_db_file, "workaudit_audit.db");
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WORKAUDIT_STORAGE__BASE_DIR", "/srv/audit");
            jail.set_env("WORKAUDIT_STORAGE__AUDIT_DB_FILE", "chain.db");
            let config: WorkAuditConfig = WorkAuditConfig::figment().extract()?;
            assert_eq!(config.storage.base_dir, "/srv/audit");
            assert_eq!(config.storage.audit_db_file, "chain.db");
            Ok(())
        });
    }

    #[test]
    fn local_toml_layer_applies() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".workaudit")?;
            jail.create_file(
                ".workaudit/config.toml",
                r#"
                [storage]
                base_dir = "/var/lib/workaudit"
                "#,
            )?;
            let config: WorkAuditConfig = WorkAuditConfig::figment().extract()?;
            assert_eq!(config.storage.base_dir, "/var/lib/workaudit");
            // Unset fields keep their defaults.
            assert_eq!(config.storage.forward_file, "audit_forward/audit.jsonl");
            Ok(())
        });
    }
}
