use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration: tracker API credentials and sync preferences.
/// Read from `config.toml`; the mutable session state lives in
/// `SettingsStore` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub sync: SyncPrefs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPrefs {
    /// Refresh watched history when the host signals readiness, subject to
    /// the cache TTL.
    #[serde(default = "default_true")]
    pub sync_on_start: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SyncPrefs {
    fn default() -> Self {
        Self {
            sync_on_start: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            tracker: TrackerConfig {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            },
            sync: SyncPrefs {
                sync_on_start: false,
            },
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.tracker.client_id, "id");
        assert!(!loaded.sync.sync_on_start);
    }

    #[test]
    fn test_sync_prefs_default_when_absent() {
        let config: Config = toml::from_str(
            r#"
            [tracker]
            client_id = "id"
            client_secret = "secret"
            "#,
        )
        .unwrap();
        assert!(config.sync.sync_on_start);
    }
}
