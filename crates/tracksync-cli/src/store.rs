use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use track_sync_core::WatchedStore;
use track_sync_models::WatchedRecord;

#[derive(Debug, Default, Serialize, Deserialize)]
struct WatchedDb {
    movies: Vec<WatchedRecord>,
    episodes: Vec<WatchedRecord>,
}

/// File-backed watched database: one JSON document, rewritten whole on every
/// change. The sync layer replaces everything per run anyway, so there is no
/// point in anything fancier.
pub struct JsonWatchedStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonWatchedStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn read_db(path: &Path) -> Result<WatchedDb> {
        if !path.exists() {
            return Ok(WatchedDb::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read watched database at {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Corrupt watched database at {}", path.display()))
    }

    fn write_db(path: &Path, db: &WatchedDb) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(db)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write watched database at {}", path.display()))
    }

    /// Movie and episode record counts, for the status command.
    pub fn counts(&self) -> Result<(usize, usize)> {
        let db = Self::read_db(&self.path)?;
        Ok((db.movies.len(), db.episodes.len()))
    }
}

#[async_trait]
impl WatchedStore for JsonWatchedStore {
    async fn mark_movies_watched(&self, records: &[WatchedRecord]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut db = Self::read_db(&self.path)?;
        db.movies.extend_from_slice(records);
        Self::write_db(&self.path, &db)
    }

    async fn mark_episodes_watched(&self, records: &[WatchedRecord]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut db = Self::read_db(&self.path)?;
        db.episodes.extend_from_slice(records);
        Self::write_db(&self.path, &db)
    }

    async fn clear_watched(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        Self::write_db(&self.path, &WatchedDb::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_records_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonWatchedStore::new(dir.path().join("watched.json"));

        let movies = vec![WatchedRecord::movie("tt0137523", Utc::now())];
        let episodes = vec![WatchedRecord::episode("tt0411008", "73739", 1, 2, Utc::now())];
        store.mark_movies_watched(&movies).await.unwrap();
        store.mark_episodes_watched(&episodes).await.unwrap();

        assert_eq!(store.counts().unwrap(), (1, 1));
    }

    #[tokio::test]
    async fn test_clear_drops_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonWatchedStore::new(dir.path().join("watched.json"));

        store
            .mark_movies_watched(&[WatchedRecord::movie("tt0137523", Utc::now())])
            .await
            .unwrap();
        store.clear_watched().await.unwrap();

        assert_eq!(store.counts().unwrap(), (0, 0));
    }

    #[test]
    fn test_missing_file_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonWatchedStore::new(dir.path().join("watched.json"));
        assert_eq!(store.counts().unwrap(), (0, 0));
    }
}
