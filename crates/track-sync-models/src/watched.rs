use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaType;

/// One row of the local watched database.
///
/// Movies carry only `imdb_id`; episodes additionally carry the parent show's
/// `tvdb_id` plus season/episode numbers. Numbers are stored as strings
/// because the media-center database keys them that way. Records are written
/// once per sync and never mutated - a full sync deletes and rewrites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchedRecord {
    pub imdb_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    pub watched_at: DateTime<Utc>,
    pub media_type: MediaType,
}

impl WatchedRecord {
    pub fn movie(imdb_id: impl Into<String>, watched_at: DateTime<Utc>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            tvdb_id: None,
            season: None,
            episode: None,
            watched_at,
            media_type: MediaType::Movie,
        }
    }

    pub fn episode(
        imdb_id: impl Into<String>,
        tvdb_id: impl Into<String>,
        season: u32,
        episode: u32,
        watched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            tvdb_id: Some(tvdb_id.into()),
            season: Some(season.to_string()),
            episode: Some(episode.to_string()),
            watched_at,
            media_type: MediaType::Episode,
        }
    }
}
