use tracing::{debug, warn};
use track_sync_models::{HistoryItem, ScrobbleAction, WatchedEvent};

use crate::service::SyncService;

/// Pick the remote history payload for an event: episodes are keyed by the
/// TVDB id when one is present, movies fall back to the IMDB id.
fn history_item_for(event: &WatchedEvent) -> Option<HistoryItem> {
    if let Some(tvdb_id) = event.episode_tvdb_id.as_deref().filter(|id| !id.is_empty()) {
        return Some(HistoryItem::episode(tvdb_id));
    }
    event
        .imdb_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(HistoryItem::movie)
}

impl SyncService {
    /// Relay a local "watched" toggle to the remote history. Fire-and-forget:
    /// remote failures are logged and dropped, nothing local changes.
    pub async fn watched(&self, event: &WatchedEvent) {
        let Some(item) = history_item_for(event) else {
            warn!("Watched event carries no usable external id, ignoring");
            return;
        };
        debug!(?item, "Adding item to remote history");
        if let Err(err) = self.client.add_to_history(&item).await {
            warn!(error = %err, "Failed to add item to remote history");
        }
    }

    /// Relay a local "unwatched" toggle to the remote history.
    pub async fn unwatched(&self, event: &WatchedEvent) {
        let Some(item) = history_item_for(event) else {
            warn!("Unwatched event carries no usable external id, ignoring");
            return;
        };
        debug!(?item, "Removing item from remote history");
        if let Err(err) = self.client.remove_from_history(&item).await {
            warn!(error = %err, "Failed to remove item from remote history");
        }
    }

    /// Report playback state for the item the event describes, with the
    /// event's progress fraction. Same fire-and-forget policy as the
    /// history relays.
    pub async fn scrobble(&self, action: ScrobbleAction, event: &WatchedEvent) {
        let Some(item) = history_item_for(event) else {
            warn!("Scrobble event carries no usable external id, ignoring");
            return;
        };
        let progress = event.progress.unwrap_or(0.0);
        if let Err(err) = self.client.scrobble(action, &item, progress).await {
            warn!(error = %err, action = action.as_str(), "Scrobble failed");
        }
    }
}
