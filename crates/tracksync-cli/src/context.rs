use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use track_sync_core::{ResumeOutcome, SyncService};
use track_sync_remote::TraktClient;
use track_sync_settings::{Config, PathManager, SettingsStore};

use crate::hooks::{NoWatchlist, TerminalPrompt};
use crate::store::JsonWatchedStore;

/// Wire a [`SyncService`] from the on-disk configuration. Fails with a
/// pointer to `tracksync config` when no credentials are stored yet.
pub fn build_service(paths: &PathManager) -> Result<SyncService> {
    paths.ensure_directories()?;

    let config_file = paths.config_file();
    let config = Config::load(&config_file).with_context(|| {
        format!(
            "No tracker credentials at {} (run `tracksync config` first)",
            config_file.display()
        )
    })?;

    let mut settings = SettingsStore::new(paths.settings_file());
    settings.load()?;

    let client = TraktClient::new(
        config.tracker.client_id.clone(),
        config.tracker.client_secret.clone(),
    );
    let store = JsonWatchedStore::new(paths.watched_db_file());

    Ok(SyncService::new(
        Arc::new(client),
        Arc::new(store),
        Arc::new(NoWatchlist),
        Arc::new(TerminalPrompt),
        settings,
    ))
}

/// Import the stored token without running the startup gate, turning the
/// non-resumed outcomes into user-facing errors.
pub async fn connect_or_fail(service: &SyncService) -> Result<()> {
    match service.connect().await {
        ResumeOutcome::Resumed => Ok(()),
        ResumeOutcome::NoToken => Err(anyhow!("Not signed in (run `tracksync auth` first)")),
        ResumeOutcome::Failed => Err(anyhow!(
            "Stored session could not be restored, sign in again with `tracksync auth`"
        )),
    }
}
