//! Configuration management
//!
//! This module handles loading, saving, and migrating the ncs configuration file.
//! The configuration file is stored in TOML format at `$NCS_CONFIG_DIR/config.toml`
//! or, when that variable is unset, at `~/.config/ncs/config.toml`.
//!
//! Secrets are never stored in the file. The `[storage]` table only names the
//! environment variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::{DEFAULT_ACCESS_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_REGION, DEFAULT_SECRET_KEY_ENV};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "NCS_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Default output format
const DEFAULT_OUTPUT: &str = "human";

/// Default color setting
const DEFAULT_COLOR: &str = "auto";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Storage service profile
    #[serde(default)]
    pub storage: StorageProfile,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,

    /// Show progress indicators
    #[serde(default = "default_true")]
    pub progress: bool,
}

/// Connection settings for the storage service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProfile {
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Signing region
    #[serde(default = "default_region")]
    pub region: String,

    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    #[serde(default = "default_true")]
    pub force_path_style: bool,

    /// Name of the environment variable holding the access key
    #[serde(default = "default_access_key_env")]
    pub access_key_env: String,

    /// Name of the environment variable holding the secret key
    #[serde(default = "default_secret_key_env")]
    pub secret_key_env: String,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_access_key_env() -> String {
    DEFAULT_ACCESS_KEY_ENV.to_string()
}

fn default_secret_key_env() -> String {
    DEFAULT_SECRET_KEY_ENV.to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            progress: true,
        }
    }
}

impl Default for StorageProfile {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            force_path_style: true,
            access_key_env: default_access_key_env(),
            secret_key_env: default_secret_key_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            storage: StorageProfile::default(),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// Honors `NCS_CONFIG_DIR` before falling back to the platform config directory.
    pub fn new() -> Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(Self::with_path(Path::new(&dir).join(CONFIG_FILE_NAME)));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("ncs").join(CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// If the schema version doesn't match, attempts migration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade ncs.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        tracing::debug!(path = %self.config_path.display(), "loaded config file");
        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }

    /// Migrate configuration from older schema version
    fn migrate(&self, config: Config) -> Result<Config> {
        let mut config = config;

        // Schema 0 files predate the [storage] table; serde defaults already filled it.
        tracing::info!(
            from = config.schema_version,
            to = SCHEMA_VERSION,
            "migrating config file"
        );
        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.output, "human");
        assert_eq!(config.defaults.color, "auto");
        assert!(config.defaults.progress);
        assert_eq!(config.storage.region, "kr-standard");
        assert_eq!(config.storage.endpoint, "https://kr.object.ncloudstorage.com");
        assert!(config.storage.force_path_style);
        assert_eq!(config.storage.access_key_env, "NCP_ACCESS_KEY");
        assert_eq!(config.storage.secret_key_env, "NCP_SECURITY_KEY");
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.storage, StorageProfile::default());
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::default();
        config.storage.endpoint = "http://localhost:9000".to_string();
        config.storage.region = "us-east-1".to_string();
        config.defaults.output = "json".to_string();

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.storage.endpoint, "http://localhost:9000");
        assert_eq!(loaded.storage.region, "us-east-1");
        assert_eq!(loaded.defaults.output, "json");
    }

    #[test]
    fn test_partial_storage_table_uses_defaults() {
        let (manager, _temp_dir) = temp_config_manager();
        let content = r#"
            schema_version = 1

            [storage]
            region = "fin-standard"
        "#;
        std::fs::write(manager.config_path(), content).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.storage.region, "fin-standard");
        assert_eq!(config.storage.endpoint, DEFAULT_ENDPOINT);
        assert!(config.storage.force_path_style);
    }

    #[test]
    fn test_old_schema_is_migrated() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = 0\n").unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("newer than supported")
        );
    }

    #[test]
    fn test_malformed_file_is_error() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [").unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (manager, _temp_dir) = temp_config_manager();
        manager.save(&Config::default()).unwrap();

        let mode = std::fs::metadata(manager.config_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
