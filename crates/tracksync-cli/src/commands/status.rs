use anyhow::Result;
use track_sync_settings::{PathManager, SettingsStore};

use crate::store::JsonWatchedStore;

pub fn run(paths: &PathManager) -> Result<()> {
    let mut settings = SettingsStore::new(paths.settings_file());
    settings.load()?;

    match settings.get_auth_token() {
        Some(token) => println!(
            "Signed in (token expires {})",
            token.expires_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("Not signed in"),
    }

    match settings.get_last_sync_at() {
        Some(at) => println!("Last sync: {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Last sync: never"),
    }

    let store = JsonWatchedStore::new(paths.watched_db_file());
    let (movies, episodes) = store.counts()?;
    println!("Watched records: {movies} movie(s), {episodes} episode(s)");

    Ok(())
}
