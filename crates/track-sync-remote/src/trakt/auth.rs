use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::{debug, warn};
use track_sync_models::{AuthToken, DeviceCode};

use crate::error::RemoteError;

const DEVICE_CODE_URL: &str = "https://api.trakt.tv/oauth/device/code";
const DEVICE_TOKEN_URL: &str = "https://api.trakt.tv/oauth/device/token";
const TOKEN_URL: &str = "https://api.trakt.tv/oauth/token";

/// Create a reqwest Client with browser-like headers to bypass Cloudflare
pub fn create_tracker_client() -> Client {
    Client::builder()
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
}

impl TokenResponse {
    fn into_token(self) -> AuthToken {
        // Shave two minutes off the advertised lifetime so a token is never
        // used right at its expiry boundary.
        let expires_at = Utc::now() + Duration::seconds(self.expires_in as i64 - 120);
        AuthToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    user_code: String,
    device_code: String,
    verification_url: String,
    expires_in: u64,
    #[serde(default = "default_interval")]
    interval: u64,
}

fn default_interval() -> u64 {
    5
}

/// Request a device code for out-of-band user approval.
pub async fn request_device_code(client: &Client, client_id: &str) -> Result<DeviceCode, RemoteError> {
    let payload = serde_json::json!({ "client_id": client_id });

    let response = client
        .post(DEVICE_CODE_URL)
        .json(&payload)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::api("oauth/device/code", status, body));
    }

    let code: DeviceCodeResponse = response.json().await?;
    debug!(
        expires_in = code.expires_in,
        interval = code.interval,
        "Received device code"
    );

    Ok(DeviceCode {
        user_code: code.user_code,
        device_code: code.device_code,
        verification_url: code.verification_url,
        expires_in: code.expires_in,
        interval: code.interval,
    })
}

/// Poll the token endpoint until the user approves the device code.
///
/// Status semantics per the Trakt device API: 200 approved, 400 pending,
/// 410 expired, 418 denied, 429 polling too fast.
pub async fn poll_device_token(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    code: &DeviceCode,
) -> Result<AuthToken, RemoteError> {
    let deadline: DateTime<Utc> = Utc::now() + Duration::seconds(code.expires_in as i64);
    let mut interval = code.interval.max(1);

    let payload = serde_json::json!({
        "code": code.device_code,
        "client_id": client_id,
        "client_secret": client_secret,
    });

    loop {
        if Utc::now() >= deadline {
            return Err(RemoteError::CodeExpired);
        }

        sleep(StdDuration::from_secs(interval)).await;

        let response = client
            .post(DEVICE_TOKEN_URL)
            .json(&payload)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let token: TokenResponse = response.json().await?;
                return Ok(token.into_token());
            }
            400 => {
                // Authorization pending, keep polling
                debug!("Device approval pending");
            }
            429 => {
                warn!("Polling too fast, backing off");
                interval *= 2;
            }
            410 => return Err(RemoteError::CodeExpired),
            418 => return Err(RemoteError::AuthDenied),
            _ => {
                let body = response.text().await.unwrap_or_default();
                return Err(RemoteError::api("oauth/device/token", status, body));
            }
        }
    }
}

/// Exchange a refresh token for a fresh access token.
pub async fn refresh_access_token(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<AuthToken, RemoteError> {
    let payload = serde_json::json!({
        "refresh_token": refresh_token,
        "client_id": client_id,
        "client_secret": client_secret,
        "redirect_uri": "urn:ietf:wg:oauth:2.0:oob",
        "grant_type": "refresh_token"
    });

    let response = client
        .post(TOKEN_URL)
        .json(&payload)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::api("oauth/token", status, body));
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.into_token())
}
