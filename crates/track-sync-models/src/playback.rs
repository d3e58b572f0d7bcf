use serde::{Deserialize, Serialize};

use crate::media::MediaType;
use crate::media_ids::MediaIds;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackKind {
    Movies,
    Episodes,
}

impl PlaybackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackKind::Movies => "movies",
            PlaybackKind::Episodes => "episodes",
        }
    }
}

impl From<MediaType> for PlaybackKind {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => PlaybackKind::Movies,
            MediaType::Episode => PlaybackKind::Episodes,
        }
    }
}

/// One saved playback position from the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackEntry {
    pub ids: MediaIds,
    /// Progress fraction in percent, 0.0 to 100.0.
    pub progress: f64,
}
