use anyhow::Result;
use async_trait::async_trait;
use track_sync_models::{DeviceCode, WatchedRecord};

/// Façade over the media-center watched database. Batch upserts are keyed by
/// external id and must be idempotent; `clear_watched` drops every record.
#[async_trait]
pub trait WatchedStore: Send + Sync {
    async fn mark_movies_watched(&self, records: &[WatchedRecord]) -> Result<()>;
    async fn mark_episodes_watched(&self, records: &[WatchedRecord]) -> Result<()>;
    async fn clear_watched(&self) -> Result<()>;
}

/// Hook for the host's watchlist provider, refreshed alongside the watched
/// sync.
#[async_trait]
pub trait WatchlistRefresh: Send + Sync {
    async fn refresh(&self, force: bool) -> Result<()>;
}

/// Presentation hook for the device-code handshake: showing the code,
/// copying it to a clipboard, opening the verification URL. All side
/// effects belong to the host.
pub trait DevicePrompt: Send + Sync {
    fn show_device_code(&self, code: &DeviceCode);
}
