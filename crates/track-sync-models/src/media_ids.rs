use serde::{Deserialize, Serialize};

/// External identifiers attached to a remote media item.
///
/// The tracker returns a bag of ids per item; which ones are populated varies
/// by item and by catalogue coverage, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<String>,
    pub tmdb_id: Option<u64>,
    pub trakt_id: Option<u64>,
    pub slug: Option<String>,
}

impl MediaIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids keyed by an IMDB id only (movie history payloads).
    pub fn from_imdb(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: Some(imdb_id.into()),
            ..Self::default()
        }
    }

    /// Ids keyed by a TVDB id only (episode history payloads).
    pub fn from_tvdb(tvdb_id: impl Into<String>) -> Self {
        Self {
            tvdb_id: Some(tvdb_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imdb_id.is_none()
            && self.tvdb_id.is_none()
            && self.tmdb_id.is_none()
            && self.trakt_id.is_none()
            && self.slug.is_none()
    }

    /// True when `id` equals either the IMDB or the TVDB id.
    pub fn matches(&self, id: &str) -> bool {
        self.imdb_id.as_deref() == Some(id) || self.tvdb_id.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_imdb_or_tvdb() {
        let ids = MediaIds {
            imdb_id: Some("tt001".to_string()),
            tvdb_id: Some("70327".to_string()),
            ..MediaIds::default()
        };
        assert!(ids.matches("tt001"));
        assert!(ids.matches("70327"));
        assert!(!ids.matches("tt999"));
    }

    #[test]
    fn test_empty_ids_match_nothing() {
        let ids = MediaIds::default();
        assert!(ids.is_empty());
        assert!(!ids.matches("tt001"));
        assert!(!ids.matches(""));
    }
}
