use async_trait::async_trait;
use track_sync_models::{
    Activities, AuthToken, DeviceCode, HistoryItem, PlaybackEntry, PlaybackKind, ScrobbleAction,
    WatchedMovie, WatchedShow,
};

use crate::error::RemoteError;

/// Surface of the remote tracking service the sync core consumes.
///
/// One shared instance serves the whole session; implementations hold their
/// token behind interior mutability so `import_token` can rotate it without
/// exclusive access to the client.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Request a device code and verification URL for out-of-band approval.
    async fn device_code(&self) -> Result<DeviceCode, RemoteError>;

    /// Poll until the user approves the device code, it expires, or the
    /// tracker rejects it. Owns the poll interval and timeout.
    async fn poll_token(&self, code: &DeviceCode) -> Result<AuthToken, RemoteError>;

    /// Install a previously issued token, refreshing it when it is expired
    /// or about to expire. Returns the token now in effect.
    async fn import_token(&self, token: AuthToken) -> Result<AuthToken, RemoteError>;

    async fn watched_movies(&self) -> Result<Vec<WatchedMovie>, RemoteError>;

    async fn watched_shows(&self) -> Result<Vec<WatchedShow>, RemoteError>;

    async fn last_activities(&self) -> Result<Activities, RemoteError>;

    async fn add_to_history(&self, item: &HistoryItem) -> Result<(), RemoteError>;

    async fn remove_from_history(&self, item: &HistoryItem) -> Result<(), RemoteError>;

    async fn scrobble(
        &self,
        action: ScrobbleAction,
        item: &HistoryItem,
        progress: f64,
    ) -> Result<(), RemoteError>;

    /// Most recent saved playback positions, newest first, up to `limit`.
    async fn playback(
        &self,
        kind: PlaybackKind,
        limit: u32,
    ) -> Result<Vec<PlaybackEntry>, RemoteError>;
}
