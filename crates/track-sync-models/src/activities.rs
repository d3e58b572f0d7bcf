use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps of the most recent remote watched activity, per media kind.
/// Used by the scheduler gate to decide whether a resync is worth the
/// transfer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activities {
    pub movies_watched_at: Option<DateTime<Utc>>,
    pub episodes_watched_at: Option<DateTime<Utc>>,
}

impl Activities {
    /// The later of the movie and episode watched-at timestamps.
    pub fn latest(&self) -> Option<DateTime<Utc>> {
        match (self.movies_watched_at, self.episodes_watched_at) {
            (Some(m), Some(e)) => Some(m.max(e)),
            (m, e) => m.or(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_latest_picks_later_timestamp() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let activities = Activities {
            movies_watched_at: Some(earlier),
            episodes_watched_at: Some(later),
        };
        assert_eq!(activities.latest(), Some(later));
    }

    #[test]
    fn test_latest_with_one_side_missing() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let activities = Activities {
            movies_watched_at: None,
            episodes_watched_at: Some(ts),
        };
        assert_eq!(activities.latest(), Some(ts));
        assert_eq!(Activities::default().latest(), None);
    }
}
