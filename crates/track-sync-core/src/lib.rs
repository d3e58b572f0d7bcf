pub mod error;
pub mod history;
pub mod playback;
pub mod report;
pub mod service;
pub mod sync;
pub mod traits;


pub use error::AuthError;
pub use playback::PLAYBACK_SCAN_LIMIT;
pub use report::{ResumeOutcome, SyncAllReport, SyncReport};
pub use service::{SyncService, CACHE_TTL_MINUTES};
pub use traits::{DevicePrompt, WatchedStore, WatchlistRefresh};
