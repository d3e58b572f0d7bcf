use track_sync_models::MediaType;
use track_sync_remote::RemoteError;

use crate::service::SyncService;

/// How many recent playback entries to scan. Anything older is deliberately
/// out of reach - this is a best-effort lookup, not an exhaustive search.
pub const PLAYBACK_SCAN_LIMIT: u32 = 50;

impl SyncService {
    /// Look up the saved playback progress for a media item, scanning the
    /// most recent entries in the order the tracker returns them. Returns
    /// 0.0 when nothing among them matches the id.
    pub async fn playback_progress(
        &self,
        media_type: MediaType,
        id: &str,
    ) -> Result<f64, RemoteError> {
        let entries = self
            .client
            .playback(media_type.into(), PLAYBACK_SCAN_LIMIT)
            .await?;

        Ok(entries
            .iter()
            .find(|entry| entry.ids.matches(id))
            .map(|entry| entry.progress)
            .unwrap_or(0.0))
    }
}
