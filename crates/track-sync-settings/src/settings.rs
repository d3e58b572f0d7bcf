use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;
use track_sync_models::AuthToken;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SettingsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Persisted session state: auth token, sync timestamps, and preferences.
/// Stored as a flat TOML key/value file so partial writes and factory resets
/// stay trivial.
pub struct SettingsStore {
    path: PathBuf,
    settings: HashMap<String, String>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            settings: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let settings_data: SettingsData = toml::from_str(&content)?;
            self.settings = settings_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let settings_data = SettingsData {
            data: self.settings.clone(),
        };
        let content = toml::to_string_pretty(&settings_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.settings.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.settings.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.settings.remove(key);
    }

    // Auth token, stored as individual keys

    pub fn get_auth_token(&self) -> Option<AuthToken> {
        let access_token = self.get("access_token")?.clone();
        let refresh_token = self.get("refresh_token")?.clone();
        let expires_at = self
            .get("token_expires")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))?;
        Some(AuthToken {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    pub fn set_auth_token(&mut self, token: &AuthToken) {
        self.set("access_token".to_string(), token.access_token.clone());
        self.set("refresh_token".to_string(), token.refresh_token.clone());
        self.set("token_expires".to_string(), token.expires_at.to_rfc3339());
    }

    // Sync timestamps

    pub fn get_last_sync_at(&self) -> Option<DateTime<Utc>> {
        self.get("last_sync_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_last_sync_at(&mut self, timestamp: DateTime<Utc>) {
        self.set("last_sync_at".to_string(), timestamp.to_rfc3339());
    }

    pub fn get_last_activity_at(&self) -> Option<DateTime<Utc>> {
        self.get("last_activity_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_last_activity_at(&mut self, timestamp: DateTime<Utc>) {
        self.set("last_activity_at".to_string(), timestamp.to_rfc3339());
    }

    // Preferences

    pub fn get_sync_on_start(&self) -> bool {
        self.get("sync_on_start")
            .map(|s| s == "true")
            .unwrap_or(true)
    }

    pub fn set_sync_on_start(&mut self, enabled: bool) {
        self.set("sync_on_start".to_string(), enabled.to_string());
    }

    /// Remove the token and every sync timestamp: factory state.
    pub fn clear_session(&mut self) {
        self.remove("access_token");
        self.remove("refresh_token");
        self.remove("token_expires");
        self.remove("last_sync_at");
        self.remove("last_activity_at");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn test_token() -> AuthToken {
        AuthToken {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        }
    }

    #[test]
    fn test_settings_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = SettingsStore::new(path.clone());
        store.set_auth_token(&test_token());
        store.set_sync_on_start(false);
        store.save().unwrap();

        let mut loaded = SettingsStore::new(path);
        loaded.load().unwrap();
        let token = loaded.get_auth_token().unwrap();
        assert_eq!(token.access_token, "access");
        assert_eq!(token.refresh_token, "refresh");
        assert!(!loaded.get_sync_on_start());
    }

    #[test]
    fn test_settings_store_token_expiry_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let token = test_token();
        let mut store = SettingsStore::new(path.clone());
        store.set_auth_token(&token);
        store.save().unwrap();

        let mut loaded = SettingsStore::new(path);
        loaded.load().unwrap();
        let loaded_expires = loaded.get_auth_token().unwrap().expires_at;
        // Allow 1 second difference for serialization
        assert!((loaded_expires - token.expires_at).num_seconds().abs() < 2);
    }

    #[test]
    fn test_clear_session_removes_auth_and_timestamps() {
        let mut store = SettingsStore::new(PathBuf::from("/tmp/unused"));
        store.set_auth_token(&test_token());
        store.set_last_sync_at(Utc::now());
        store.set_last_activity_at(Utc::now());
        store.set_sync_on_start(false);

        store.clear_session();

        assert!(store.get_auth_token().is_none());
        assert!(store.get_last_sync_at().is_none());
        assert!(store.get_last_activity_at().is_none());
        // Preferences survive a disconnect
        assert!(!store.get_sync_on_start());
    }

    #[test]
    fn test_missing_token_component_yields_none() {
        let mut store = SettingsStore::new(PathBuf::from("/tmp/unused"));
        store.set("access_token".to_string(), "access".to_string());
        // No refresh token or expiry stored
        assert!(store.get_auth_token().is_none());
    }

    #[test]
    fn test_sync_on_start_defaults_to_true() {
        let store = SettingsStore::new(PathBuf::from("/tmp/unused"));
        assert!(store.get_sync_on_start());
    }
}
