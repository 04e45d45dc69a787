//! Configuration file support for Move.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/move/config.toml`.

use crate::store::remote::DEFAULT_TABLE;
use crate::sync::SyncSettings;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Remote write timing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_synced_reset_ms")]
    pub synced_reset_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            synced_reset_ms: default_synced_reset_ms(),
        }
    }
}

impl SyncConfig {
    pub fn settings(&self) -> SyncSettings {
        SyncSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            synced_reset: Duration::from_millis(self.synced_reset_ms),
        }
    }
}

/// Remote row store; disabled unless both `url` and `user_id` are set
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default)]
    pub user_id: Option<Uuid>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_table(),
            user_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Endpoint and user of an enabled remote store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteTarget {
    pub url: String,
    pub api_key: Option<String>,
    pub table: String,
    pub user_id: Uuid,
    pub timeout: Duration,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("move")
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_synced_reset_ms() -> u64 {
    2000
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("move").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// The remote store to use, if one is fully configured
    pub fn remote_identity(&self) -> Option<RemoteTarget> {
        let url = self.remote.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let user_id = self.remote.user_id?;

        Some(RemoteTarget {
            url: url.to_string(),
            api_key: self.remote.api_key.clone(),
            table: self.remote.table.clone(),
            user_id,
            timeout: Duration::from_secs(self.remote.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data.data_dir.ends_with("move"));
        assert_eq!(config.sync.debounce_ms, 500);
        assert_eq!(config.sync.synced_reset_ms, 2000);
        assert_eq!(config.remote.table, "workout_progress");
        assert!(config.remote_identity().is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.remote.url = Some("https://db.example.com".into());
        config.remote.user_id = Some(Uuid::nil());
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.sync.debounce_ms, parsed.sync.debounce_ms);
        assert_eq!(config.remote_identity(), parsed.remote_identity());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[sync]
debounce_ms = 250
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sync.settings().debounce, Duration::from_millis(250));
        assert_eq!(config.sync.synced_reset_ms, 2000); // default
    }

    #[test]
    fn test_remote_needs_url_and_user() {
        let toml_str = r#"
[remote]
url = "https://db.example.com/"
api_key = "anon"
"#;
        let mut config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.remote_identity().is_none());

        let user = Uuid::parse_str("9c1f8f3a-7d2e-4b6a-8e1d-0f2a3b4c5d6e").unwrap();
        config.remote.user_id = Some(user);
        let target = config.remote_identity().unwrap();
        assert_eq!(target.user_id, user);
        assert_eq!(target.table, "workout_progress");
        assert_eq!(target.timeout, Duration::from_secs(10));
        assert_eq!(target.api_key.as_deref(), Some("anon"));
    }

    #[test]
    fn test_save_and_load_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/config.toml");
        let mut config = Config::default();
        config.data.data_dir = temp_dir.path().join("data");

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data.data_dir, config.data.data_dir);
    }
}
