use serde::{Deserialize, Serialize};

/// A watched/unwatched notification from the host application.
///
/// An event carrying an episode TVDB id is treated as an episode; otherwise
/// the IMDB id identifies a movie. The host passes these to the history
/// bridge instead of broadcasting them on an event bus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchedEvent {
    pub imdb_id: Option<String>,
    pub episode_tvdb_id: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    /// Playback progress fraction in percent, for scrobble calls.
    pub progress: Option<f64>,
}

impl WatchedEvent {
    pub fn is_episode(&self) -> bool {
        self.episode_tvdb_id.is_some()
    }
}
