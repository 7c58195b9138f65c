//! # Runtime Configuration
//!
//! Where the core keeps its data and how large the audit trails may grow.
//! Every field has a default; environment overrides that fail to parse are
//! reported with `warn!` and ignored.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use ls_02_domain_store::StoreConfig;
use ls_telemetry::TelemetryConfig;
use thiserror::Error;
use tracing::warn;

/// Name of the store file inside `data_dir`.
pub const STORE_FILE_NAME: &str = "loansphere.db";

/// Backing key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Single file under `data_dir`.
    #[default]
    File,
    /// Process memory only; nothing survives a restart.
    InMemory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => f.write_str("file"),
            StorageBackend::InMemory => f.write_str("memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" | "in-memory" => Ok(StorageBackend::InMemory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory holding the store file.
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    /// Domain store limits.
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage: StorageBackend::default(),
            store: StoreConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// - `LS_DATA_DIR`: data directory (default: ./data)
    /// - `LS_STORAGE`: `file` or `memory` (default: file)
    /// - `LS_MAX_ACTIVITY`: activity log bound (default: 1000)
    /// - `LS_MAX_NOTIFICATIONS`: notification feed bound (default: 200)
    /// - `LS_SEED`: seed demo data on first run (default: true)
    ///
    /// Telemetry settings come from [`TelemetryConfig::from_env`].
    pub fn from_env() -> Self {
        let mut config = Self::from_vars(|name| env::var(name).ok());
        config.telemetry = TelemetryConfig::from_env();
        config
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = var("LS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(storage) = var("LS_STORAGE") {
            match storage.parse() {
                Ok(backend) => config.storage = backend,
                Err(e) => warn!(error = %e, "Ignoring LS_STORAGE"),
            }
        }
        if let Some(max) = parse_var(&var, "LS_MAX_ACTIVITY") {
            config.store = config.store.with_max_activity_entries(max);
        }
        if let Some(max) = parse_var(&var, "LS_MAX_NOTIFICATIONS") {
            config.store = config.store.with_max_notifications(max);
        }
        if let Some(seed) = parse_var(&var, "LS_SEED") {
            config.store = config.store.with_seed_on_first_run(seed);
        }

        config
    }

    /// Full path of the store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Rejects configurations the core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.max_activity_entries == 0 {
            return Err(ConfigError::ZeroBound("max_activity_entries"));
        }
        if self.store.max_notifications == 0 {
            return Err(ConfigError::ZeroBound("max_notifications"));
        }
        if self.storage == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingDataDir);
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = var(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparsable value");
            None
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend '{0}' (expected 'file' or 'memory')")]
    UnknownBackend(String),

    #[error("{0} must be at least 1")]
    ZeroBound(&'static str),

    #[error("File storage needs a data directory")]
    MissingDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.store_path(), PathBuf::from("./data/loansphere.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LS_DATA_DIR", "/var/lib/loansphere"),
            ("LS_STORAGE", "Memory"),
            ("LS_MAX_ACTIVITY", "50"),
            ("LS_MAX_NOTIFICATIONS", "10"),
            ("LS_SEED", "false"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/loansphere"));
        assert_eq!(config.storage, StorageBackend::InMemory);
        assert_eq!(config.store.max_activity_entries, 50);
        assert_eq!(config.store.max_notifications, 10);
        assert!(!config.store.seed_on_first_run);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = config_from(&[("LS_STORAGE", "s3"), ("LS_MAX_ACTIVITY", "lots")]);
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.store.max_activity_entries, 1000);
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        let config = config_from(&[("LS_MAX_NOTIFICATIONS", "0")]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroBound("max_notifications"))
        );

        let config = config_from(&[("LS_DATA_DIR", "")]);
        assert_eq!(config.validate(), Err(ConfigError::MissingDataDir));
    }
}
