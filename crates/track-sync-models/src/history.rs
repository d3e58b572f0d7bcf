use serde::{Deserialize, Serialize};

use crate::media::MediaType;
use crate::media_ids::MediaIds;

/// A watched movie as reported by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    pub title: String,
    pub ids: MediaIds,
}

/// A watched show with its seasons and watched episode numbers, as reported
/// by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedShow {
    pub title: String,
    pub ids: MediaIds,
    pub seasons: Vec<WatchedSeason>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedSeason {
    pub number: u32,
    pub episodes: Vec<u32>,
}

/// Single-item payload for history add/remove and scrobble calls.
///
/// The ids are built before the item is assembled, so a payload without a
/// populated id set cannot be constructed by accident.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    pub media_type: MediaType,
    pub ids: MediaIds,
}

impl HistoryItem {
    pub fn movie(imdb_id: impl Into<String>) -> Self {
        Self {
            media_type: MediaType::Movie,
            ids: MediaIds::from_imdb(imdb_id),
        }
    }

    pub fn episode(tvdb_id: impl Into<String>) -> Self {
        Self {
            media_type: MediaType::Episode,
            ids: MediaIds::from_tvdb(tvdb_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrobbleAction {
    Start,
    Pause,
    Stop,
}

impl ScrobbleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrobbleAction::Start => "start",
            ScrobbleAction::Pause => "pause",
            ScrobbleAction::Stop => "stop",
        }
    }
}
