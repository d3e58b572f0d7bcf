use async_trait::async_trait;
use chrono::Duration;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::info;
use track_sync_models::{
    Activities, AuthToken, DeviceCode, HistoryItem, PlaybackEntry, PlaybackKind, ScrobbleAction,
    WatchedMovie, WatchedShow,
};

use crate::error::RemoteError;
use crate::traits::TrackerClient;
use crate::trakt::{api, auth};

/// Trakt implementation of [`TrackerClient`].
///
/// The access token sits behind a `RwLock` so one shared instance can serve
/// the whole session while `import_token` rotates credentials.
pub struct TraktClient {
    http: Client,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<AuthToken>>,
}

impl TraktClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: auth::create_tracker_client(),
            client_id,
            client_secret,
            token: RwLock::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, RemoteError> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or(RemoteError::NotAuthenticated)
    }
}

#[async_trait]
impl TrackerClient for TraktClient {
    async fn device_code(&self) -> Result<DeviceCode, RemoteError> {
        auth::request_device_code(&self.http, &self.client_id).await
    }

    async fn poll_token(&self, code: &DeviceCode) -> Result<AuthToken, RemoteError> {
        let token =
            auth::poll_device_token(&self.http, &self.client_id, &self.client_secret, code).await?;
        *self.token.write().await = Some(token.clone());
        info!("Device approved, access token installed");
        Ok(token)
    }

    async fn import_token(&self, token: AuthToken) -> Result<AuthToken, RemoteError> {
        // Refresh when the token is expired or expires within five minutes,
        // otherwise reuse it as-is.
        let token = if token.expires_within(Duration::minutes(5)) {
            info!("Access token expired or expiring soon, refreshing");
            auth::refresh_access_token(
                &self.http,
                &self.client_id,
                &self.client_secret,
                &token.refresh_token,
            )
            .await?
        } else {
            token
        };

        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    async fn watched_movies(&self) -> Result<Vec<WatchedMovie>, RemoteError> {
        let access_token = self.access_token().await?;
        api::get_watched_movies(&self.http, &access_token, &self.client_id).await
    }

    async fn watched_shows(&self) -> Result<Vec<WatchedShow>, RemoteError> {
        let access_token = self.access_token().await?;
        api::get_watched_shows(&self.http, &access_token, &self.client_id).await
    }

    async fn last_activities(&self) -> Result<Activities, RemoteError> {
        let access_token = self.access_token().await?;
        api::get_last_activities(&self.http, &access_token, &self.client_id).await
    }

    async fn add_to_history(&self, item: &HistoryItem) -> Result<(), RemoteError> {
        let access_token = self.access_token().await?;
        api::add_to_history(&self.http, &access_token, &self.client_id, item).await
    }

    async fn remove_from_history(&self, item: &HistoryItem) -> Result<(), RemoteError> {
        let access_token = self.access_token().await?;
        api::remove_from_history(&self.http, &access_token, &self.client_id, item).await
    }

    async fn scrobble(
        &self,
        action: ScrobbleAction,
        item: &HistoryItem,
        progress: f64,
    ) -> Result<(), RemoteError> {
        let access_token = self.access_token().await?;
        api::scrobble(&self.http, &access_token, &self.client_id, action, item, progress).await
    }

    async fn playback(
        &self,
        kind: PlaybackKind,
        limit: u32,
    ) -> Result<Vec<PlaybackEntry>, RemoteError> {
        let access_token = self.access_token().await?;
        api::get_playback(&self.http, &access_token, &self.client_id, kind, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_without_token_fail_as_not_authenticated() {
        let client = TraktClient::new("id".to_string(), "secret".to_string());
        let err = client.watched_movies().await.unwrap_err();
        assert!(matches!(err, RemoteError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_import_token_keeps_fresh_token() {
        let client = TraktClient::new("id".to_string(), "secret".to_string());
        let token = AuthToken {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: chrono::Utc::now() + Duration::hours(12),
        };
        let imported = client.import_token(token.clone()).await.unwrap();
        assert_eq!(imported, token);
        assert_eq!(client.access_token().await.unwrap(), "access");
    }
}
