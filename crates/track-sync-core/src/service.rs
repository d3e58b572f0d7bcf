use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use track_sync_models::AuthToken;
use track_sync_remote::TrackerClient;
use track_sync_settings::SettingsStore;

use crate::error::AuthError;
use crate::report::{ResumeOutcome, SyncAllReport};
use crate::traits::{DevicePrompt, WatchedStore, WatchlistRefresh};

/// How long a completed sync stays fresh before the scheduler gate will
/// consider another one.
pub const CACHE_TTL_MINUTES: i64 = 30;

/// Synchronizes the local watched database with a remote tracking service
/// and owns device-code authentication against it.
///
/// The host constructs one of these with its database façade, watchlist
/// provider and prompt, then drives it from its own events: database ready
/// maps to [`resume_session`](Self::resume_session), the authenticate button
/// to [`authenticate`](Self::authenticate), watched/unwatched toggles to the
/// history bridge.
pub struct SyncService {
    pub(crate) client: Arc<dyn TrackerClient>,
    pub(crate) store: Arc<dyn WatchedStore>,
    pub(crate) watchlist: Arc<dyn WatchlistRefresh>,
    prompt: Arc<dyn DevicePrompt>,
    pub(crate) settings: Mutex<SettingsStore>,
    authenticated: AtomicBool,
}

impl SyncService {
    pub fn new(
        client: Arc<dyn TrackerClient>,
        store: Arc<dyn WatchedStore>,
        watchlist: Arc<dyn WatchlistRefresh>,
        prompt: Arc<dyn DevicePrompt>,
        settings: SettingsStore,
    ) -> Self {
        Self {
            client,
            store,
            watchlist,
            prompt,
            settings: Mutex::new(settings),
            authenticated: AtomicBool::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// Run the device-code flow: surface the code through the prompt, block
    /// on the tracker's polling primitive, persist the token and force a
    /// full sync. On failure the persisted auth state is cleared and the
    /// error is handed back as a value.
    pub async fn authenticate(&self) -> Result<(), AuthError> {
        match self.run_device_flow().await {
            Ok(token) => {
                self.persist_token(&token).await;
                self.on_ready(true).await;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Authentication failed");
                self.disconnect().await;
                Err(err)
            }
        }
    }

    async fn run_device_flow(&self) -> Result<AuthToken, AuthError> {
        let code = self
            .client
            .device_code()
            .await
            .map_err(AuthError::DeviceCode)?;
        self.prompt.show_device_code(&code);
        self.client.poll_token(&code).await.map_err(AuthError::Poll)
    }

    /// Re-import a persisted token, typically on database-ready. Silent
    /// no-op without one; a failed import disconnects and is swallowed.
    pub async fn resume_session(&self) -> ResumeOutcome {
        self.import_persisted(true).await
    }

    /// Like [`resume_session`](Self::resume_session) but without the
    /// scheduler gate, for hosts that drive syncs explicitly.
    pub async fn connect(&self) -> ResumeOutcome {
        self.import_persisted(false).await
    }

    async fn import_persisted(&self, run_gate: bool) -> ResumeOutcome {
        let token = { self.settings.lock().await.get_auth_token() };
        let Some(token) = token else {
            return ResumeOutcome::NoToken;
        };

        match self.client.import_token(token).await {
            Ok(refreshed) => {
                self.persist_token(&refreshed).await;
                if run_gate {
                    self.on_ready(false).await;
                } else {
                    self.authenticated.store(true, Ordering::SeqCst);
                }
                ResumeOutcome::Resumed
            }
            Err(err) => {
                warn!(error = %err, "Auto sign-in failed");
                self.disconnect().await;
                ResumeOutcome::Failed
            }
        }
    }

    /// Reset auth and sync state to factory defaults. Idempotent.
    pub async fn disconnect(&self) {
        {
            let mut settings = self.settings.lock().await;
            settings.clear_session();
            if let Err(err) = settings.save() {
                warn!(error = %err, "Failed to persist cleared session state");
            }
        }
        self.authenticated.store(false, Ordering::SeqCst);
    }

    /// Scheduler gate. `forced` syncs unconditionally with the watchlist
    /// flag set; otherwise a sync runs only when the sync-on-start
    /// preference is enabled, the cache TTL has elapsed, and the tracker
    /// reports activity newer than the last one seen. When the remote has
    /// nothing new, only the sync timestamp is stamped.
    pub async fn on_ready(&self, forced: bool) -> Option<SyncAllReport> {
        self.authenticated.store(true, Ordering::SeqCst);
        info!("Tracker session authenticated");

        if forced {
            return Some(self.sync_all(true).await);
        }

        let (sync_on_start, last_sync, last_activity) = {
            let settings = self.settings.lock().await;
            (
                settings.get_sync_on_start(),
                settings.get_last_sync_at(),
                settings.get_last_activity_at(),
            )
        };

        if !sync_on_start {
            return None;
        }

        let refresh_due = last_sync
            .map(|at| at + Duration::minutes(CACHE_TTL_MINUTES) < Utc::now())
            .unwrap_or(true);
        if !refresh_due {
            return None;
        }

        let activities = match self.client.last_activities().await {
            Ok(activities) => activities,
            Err(err) => {
                warn!(error = %err, "Unable to fetch last activities");
                return None;
            }
        };

        let latest = match activities.latest() {
            Some(latest) => latest,
            None => {
                self.stamp_last_sync().await;
                return None;
            }
        };

        let has_new_activity = last_activity.map(|prev| latest > prev).unwrap_or(true);
        if has_new_activity {
            {
                let mut settings = self.settings.lock().await;
                settings.set_last_activity_at(latest);
                if let Err(err) = settings.save() {
                    warn!(error = %err, "Failed to persist last activity timestamp");
                }
            }
            Some(self.sync_all(false).await)
        } else {
            self.stamp_last_sync().await;
            None
        }
    }

    async fn persist_token(&self, token: &AuthToken) {
        let mut settings = self.settings.lock().await;
        settings.set_auth_token(token);
        if let Err(err) = settings.save() {
            warn!(error = %err, "Failed to persist auth token");
        }
    }

    pub(crate) async fn stamp_last_sync(&self) {
        let mut settings = self.settings.lock().await;
        settings.set_last_sync_at(Utc::now());
        if let Err(err) = settings.save() {
            warn!(error = %err, "Failed to persist sync timestamp");
        }
    }
}
