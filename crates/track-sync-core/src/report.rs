use serde::Serialize;

/// Outcome of one watched-list sync. Fetch and write failures are captured
/// here instead of propagated; the caller decides whether a partial result
/// is acceptable.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SyncReport {
    /// Records handed to the database façade.
    pub written: usize,
    /// Remote entries dropped for missing external ids.
    pub skipped: usize,
    pub error: Option<String>,
}

impl SyncReport {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            written: 0,
            skipped: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Combined outcome of a full sync: movies, episodes and the watchlist
/// refresh, which all settle before this is returned.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SyncAllReport {
    pub movies: SyncReport,
    pub episodes: SyncReport,
    /// Set when the stored records could not be cleared; the sync is aborted
    /// in that case since full-replace semantics cannot hold.
    pub clear_error: Option<String>,
    pub watchlist_error: Option<String>,
}

impl SyncAllReport {
    /// True when every sub-operation ran to completion (skipped entries are
    /// still a complete sync).
    pub fn is_complete(&self) -> bool {
        self.clear_error.is_none()
            && self.watchlist_error.is_none()
            && self.movies.is_ok()
            && self.episodes.is_ok()
    }
}

/// What happened when the service tried to resume a persisted session.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Nothing persisted; silent no-op.
    NoToken,
    /// Token imported and the scheduler gate ran.
    Resumed,
    /// Import failed; the session was disconnected.
    Failed,
}
