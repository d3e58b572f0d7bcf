pub mod activities;
pub mod auth;
pub mod event;
pub mod history;
pub mod media;
pub mod media_ids;
pub mod playback;
pub mod watched;

pub use activities::Activities;
pub use auth::{AuthToken, DeviceCode};
pub use event::WatchedEvent;
pub use history::{HistoryItem, ScrobbleAction, WatchedMovie, WatchedSeason, WatchedShow};
pub use media::MediaType;
pub use media_ids::MediaIds;
pub use playback::{PlaybackEntry, PlaybackKind};
pub use watched::WatchedRecord;
