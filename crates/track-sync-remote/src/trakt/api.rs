use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use track_sync_models::{
    Activities, HistoryItem, MediaIds, MediaType, PlaybackEntry, PlaybackKind, ScrobbleAction,
    WatchedMovie, WatchedSeason, WatchedShow,
};

use crate::error::RemoteError;

const API_BASE: &str = "https://api.trakt.tv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktIds {
    pub imdb: Option<String>,
    pub trakt: Option<u64>,
    pub tmdb: Option<u64>,
    pub tvdb: Option<u64>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TraktMovie {
    title: String,
    ids: TraktIds,
}

#[derive(Debug, Deserialize)]
struct TraktShow {
    title: String,
    ids: TraktIds,
}

#[derive(Debug, Deserialize)]
struct TraktWatchedMovie {
    movie: TraktMovie,
}

#[derive(Debug, Deserialize)]
struct TraktWatchedShow {
    show: TraktShow,
    #[serde(default)]
    seasons: Vec<TraktSeason>,
}

#[derive(Debug, Deserialize)]
struct TraktSeason {
    number: u32,
    #[serde(default)]
    episodes: Vec<TraktSeasonEpisode>,
}

#[derive(Debug, Deserialize)]
struct TraktSeasonEpisode {
    number: u32,
}

#[derive(Debug, Deserialize)]
struct TraktActivityGroup {
    #[serde(rename = "watched_at")]
    watched_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TraktActivities {
    movies: Option<TraktActivityGroup>,
    episodes: Option<TraktActivityGroup>,
}

#[derive(Debug, Deserialize)]
struct TraktPlaybackItem {
    progress: f64,
    #[serde(rename = "type")]
    item_type: String,
    movie: Option<TraktMovie>,
    episode: Option<TraktPlaybackEpisode>,
}

#[derive(Debug, Deserialize)]
struct TraktPlaybackEpisode {
    ids: TraktIds,
}

/// Remove slashes from IMDB ID (Trakt sometimes includes them)
fn remove_slashes(s: &str) -> String {
    s.replace('/', "")
}

fn extract_media_ids(trakt_ids: &TraktIds) -> MediaIds {
    MediaIds {
        imdb_id: trakt_ids.imdb.as_deref().map(remove_slashes),
        tvdb_id: trakt_ids.tvdb.map(|id| id.to_string()),
        tmdb_id: trakt_ids.tmdb,
        trakt_id: trakt_ids.trakt,
        slug: trakt_ids.slug.clone(),
    }
}

fn ids_payload(ids: &MediaIds) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    if let Some(ref imdb) = ids.imdb_id {
        map.insert("imdb".to_string(), serde_json::json!(imdb));
    }
    if let Some(ref tvdb) = ids.tvdb_id {
        // Trakt expects numeric TVDB ids; fall back to the raw string when
        // the id is not numeric.
        match tvdb.parse::<u64>() {
            Ok(n) => map.insert("tvdb".to_string(), serde_json::json!(n)),
            Err(_) => map.insert("tvdb".to_string(), serde_json::json!(tvdb)),
        };
    }
    serde_json::json!({ "ids": map })
}

fn with_api_headers(builder: RequestBuilder, access_token: &str, client_id: &str) -> RequestBuilder {
    builder
        .header("Authorization", format!("Bearer {}", access_token))
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
}

async fn check_status(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, RemoteError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::api(endpoint, status, body));
    }
    Ok(response)
}

/// Fetch all watched movies for the authenticated user.
pub async fn get_watched_movies(
    client: &Client,
    access_token: &str,
    client_id: &str,
) -> Result<Vec<WatchedMovie>, RemoteError> {
    let url = format!("{}/sync/watched/movies", API_BASE);
    let response = with_api_headers(client.get(&url), access_token, client_id)
        .send()
        .await?;
    let response = check_status("sync/watched/movies", response).await?;

    let items: Vec<TraktWatchedMovie> = response.json().await?;
    Ok(items
        .into_iter()
        .map(|item| WatchedMovie {
            title: item.movie.title,
            ids: extract_media_ids(&item.movie.ids),
        })
        .collect())
}

/// Fetch all watched shows, nested with seasons and watched episode numbers.
pub async fn get_watched_shows(
    client: &Client,
    access_token: &str,
    client_id: &str,
) -> Result<Vec<WatchedShow>, RemoteError> {
    let url = format!("{}/sync/watched/shows", API_BASE);
    let response = with_api_headers(client.get(&url), access_token, client_id)
        .send()
        .await?;
    let response = check_status("sync/watched/shows", response).await?;

    let items: Vec<TraktWatchedShow> = response.json().await?;
    Ok(items
        .into_iter()
        .map(|item| WatchedShow {
            title: item.show.title,
            ids: extract_media_ids(&item.show.ids),
            seasons: item
                .seasons
                .into_iter()
                .map(|season| WatchedSeason {
                    number: season.number,
                    episodes: season.episodes.into_iter().map(|e| e.number).collect(),
                })
                .collect(),
        })
        .collect())
}

/// Fetch the timestamps of the most recent remote activity.
pub async fn get_last_activities(
    client: &Client,
    access_token: &str,
    client_id: &str,
) -> Result<Activities, RemoteError> {
    let url = format!("{}/sync/last_activities", API_BASE);
    let response = with_api_headers(client.get(&url), access_token, client_id)
        .send()
        .await?;
    let response = check_status("sync/last_activities", response).await?;

    let activities: TraktActivities = response.json().await?;
    Ok(Activities {
        movies_watched_at: parse_activity(activities.movies),
        episodes_watched_at: parse_activity(activities.episodes),
    })
}

fn parse_activity(group: Option<TraktActivityGroup>) -> Option<DateTime<Utc>> {
    group
        .and_then(|g| g.watched_at)
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn history_payload(item: &HistoryItem) -> serde_json::Value {
    let key = match item.media_type {
        MediaType::Movie => "movies",
        MediaType::Episode => "episodes",
    };
    serde_json::json!({ key: [ids_payload(&item.ids)] })
}

/// Add a single item to the remote watched history.
pub async fn add_to_history(
    client: &Client,
    access_token: &str,
    client_id: &str,
    item: &HistoryItem,
) -> Result<(), RemoteError> {
    let url = format!("{}/sync/history", API_BASE);
    let response = with_api_headers(client.post(&url), access_token, client_id)
        .json(&history_payload(item))
        .send()
        .await?;
    check_status("sync/history", response).await?;
    Ok(())
}

/// Remove a single item from the remote watched history.
pub async fn remove_from_history(
    client: &Client,
    access_token: &str,
    client_id: &str,
    item: &HistoryItem,
) -> Result<(), RemoteError> {
    let url = format!("{}/sync/history/remove", API_BASE);
    let response = with_api_headers(client.post(&url), access_token, client_id)
        .json(&history_payload(item))
        .send()
        .await?;
    check_status("sync/history/remove", response).await?;
    Ok(())
}

/// Report playback state for a single item.
pub async fn scrobble(
    client: &Client,
    access_token: &str,
    client_id: &str,
    action: ScrobbleAction,
    item: &HistoryItem,
    progress: f64,
) -> Result<(), RemoteError> {
    let key = match item.media_type {
        MediaType::Movie => "movie",
        MediaType::Episode => "episode",
    };
    let mut payload = serde_json::json!({ "progress": progress });
    payload[key] = ids_payload(&item.ids);

    let url = format!("{}/scrobble/{}", API_BASE, action.as_str());
    let response = with_api_headers(client.post(&url), access_token, client_id)
        .json(&payload)
        .send()
        .await?;
    check_status("scrobble", response).await?;
    Ok(())
}

/// Fetch saved playback positions, newest first.
pub async fn get_playback(
    client: &Client,
    access_token: &str,
    client_id: &str,
    kind: PlaybackKind,
    limit: u32,
) -> Result<Vec<PlaybackEntry>, RemoteError> {
    let url = format!("{}/sync/playback/{}?limit={}", API_BASE, kind.as_str(), limit);
    let response = with_api_headers(client.get(&url), access_token, client_id)
        .send()
        .await?;
    let response = check_status("sync/playback", response).await?;

    let items: Vec<TraktPlaybackItem> = response.json().await?;
    Ok(items
        .into_iter()
        .filter_map(|item| {
            let ids = match item.item_type.as_str() {
                "movie" => item.movie.as_ref().map(|m| extract_media_ids(&m.ids)),
                "episode" => item.episode.as_ref().map(|e| extract_media_ids(&e.ids)),
                _ => None,
            }?;
            Some(PlaybackEntry {
                ids,
                progress: item.progress,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_media_ids_scrubs_slashes() {
        let trakt_ids = TraktIds {
            imdb: Some("tt/0137523".to_string()),
            trakt: Some(1),
            tmdb: Some(550),
            tvdb: Some(81189),
            slug: Some("fight-club".to_string()),
        };
        let ids = extract_media_ids(&trakt_ids);
        assert_eq!(ids.imdb_id.as_deref(), Some("tt0137523"));
        assert_eq!(ids.tvdb_id.as_deref(), Some("81189"));
    }

    #[test]
    fn test_history_payload_movie_shape() {
        let item = HistoryItem::movie("tt001");
        let payload = history_payload(&item);
        assert_eq!(payload["movies"][0]["ids"]["imdb"], "tt001");
        assert!(payload.get("episodes").is_none());
    }

    #[test]
    fn test_history_payload_episode_uses_numeric_tvdb() {
        let item = HistoryItem::episode("70327");
        let payload = history_payload(&item);
        assert_eq!(payload["episodes"][0]["ids"]["tvdb"], 70327);
    }

    #[test]
    fn test_parse_activity_timestamp() {
        let group = Some(TraktActivityGroup {
            watched_at: Some("2024-06-01T12:00:00.000Z".to_string()),
        });
        let parsed = parse_activity(group).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }
}
