use chrono::Utc;
use tracing::{debug, info, warn};
use track_sync_models::{WatchedMovie, WatchedRecord, WatchedShow};

use crate::report::{SyncAllReport, SyncReport};
use crate::service::SyncService;

/// Map remote watched movies to database records. An entry without an IMDB
/// id cannot be keyed locally and is dropped with a warning.
pub fn map_watched_movies(movies: &[WatchedMovie]) -> (Vec<WatchedRecord>, usize) {
    let now = Utc::now();
    let mut records = Vec::with_capacity(movies.len());
    let mut skipped = 0;

    for movie in movies {
        match movie.ids.imdb_id.as_deref().filter(|id| !id.is_empty()) {
            Some(imdb_id) => records.push(WatchedRecord::movie(imdb_id, now)),
            None => {
                skipped += 1;
                warn!(
                    title = %movie.title,
                    "Cannot sync movie, no IMDB id provided by tracker"
                );
            }
        }
    }

    (records, skipped)
}

/// Map remote watched shows to one record per episode. A show missing either
/// its IMDB or TVDB id contributes nothing, regardless of episode count.
pub fn map_watched_shows(shows: &[WatchedShow]) -> (Vec<WatchedRecord>, usize) {
    let now = Utc::now();
    let mut records = Vec::new();
    let mut skipped = 0;

    for show in shows {
        let imdb_id = show.ids.imdb_id.as_deref().filter(|id| !id.is_empty());
        let tvdb_id = show.ids.tvdb_id.as_deref().filter(|id| !id.is_empty());
        match (imdb_id, tvdb_id) {
            (Some(imdb_id), Some(tvdb_id)) => {
                for season in &show.seasons {
                    for &episode in &season.episodes {
                        records.push(WatchedRecord::episode(
                            imdb_id,
                            tvdb_id,
                            season.number,
                            episode,
                            now,
                        ));
                    }
                }
            }
            _ => {
                skipped += 1;
                warn!(
                    title = %show.title,
                    "Cannot sync show, no IMDB/TVDB ids provided by tracker"
                );
            }
        }
    }

    (records, skipped)
}

impl SyncService {
    /// Pull the remote watched-movies list into the local database. Fetch
    /// and write failures end up in the report, never in a panic or an
    /// `Err` - the sync layer resolves with whatever it managed to build.
    pub async fn sync_movies(&self) -> SyncReport {
        let movies = match self.client.watched_movies().await {
            Ok(movies) => movies,
            Err(err) => {
                warn!(error = %err, "Unable to sync movies");
                return SyncReport::failed(err.to_string());
            }
        };

        let (records, skipped) = map_watched_movies(&movies);
        debug!("Marking {} movie(s) as watched", records.len());

        match self.store.mark_movies_watched(&records).await {
            Ok(()) => SyncReport {
                written: records.len(),
                skipped,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "Unable to write watched movies");
                SyncReport {
                    written: 0,
                    skipped,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Pull the remote watched-shows list, one record per episode. Same
    /// resolve-with-partial policy as movies.
    pub async fn sync_episodes(&self) -> SyncReport {
        let shows = match self.client.watched_shows().await {
            Ok(shows) => shows,
            Err(err) => {
                warn!(error = %err, "Unable to sync shows");
                return SyncReport::failed(err.to_string());
            }
        };

        let (records, skipped) = map_watched_shows(&shows);
        debug!("Marking {} episode(s) as watched", records.len());

        match self.store.mark_episodes_watched(&records).await {
            Ok(()) => SyncReport {
                written: records.len(),
                skipped,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "Unable to write watched episodes");
                SyncReport {
                    written: 0,
                    skipped,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Full-replace sync: clear every stored watched record, then run the
    /// movie sync, the episode sync and the watchlist refresh concurrently.
    /// All three settle before this returns; only a clean run stamps the
    /// last-sync timestamp.
    pub async fn sync_all(&self, force_watchlist: bool) -> SyncAllReport {
        info!(
            operation = "sync_all",
            force_watchlist, "Starting full watched sync"
        );

        if let Err(err) = self.store.clear_watched().await {
            warn!(error = %err, "Unable to clear stored watched records, aborting sync");
            return SyncAllReport {
                clear_error: Some(err.to_string()),
                ..SyncAllReport::default()
            };
        }

        let (movies, episodes, watchlist) = futures::join!(
            self.sync_movies(),
            self.sync_episodes(),
            self.watchlist.refresh(force_watchlist)
        );

        let watchlist_error = watchlist.err().map(|err| {
            warn!(error = %err, "Watchlist refresh failed");
            err.to_string()
        });

        let report = SyncAllReport {
            movies,
            episodes,
            clear_error: None,
            watchlist_error,
        };

        if report.watchlist_error.is_none() {
            self.stamp_last_sync().await;
        }

        info!(
            operation = "sync_complete",
            movies_written = report.movies.written,
            episodes_written = report.episodes.written,
            complete = report.is_complete(),
            "Watched sync finished"
        );

        report
    }
}
