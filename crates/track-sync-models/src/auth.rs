use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential issued by the tracker once a device code is approved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// True when the token expires within the given margin (used to decide
    /// whether a refresh is needed before reuse).
    pub fn expires_within(&self, margin: chrono::Duration) -> bool {
        self.expires_at <= Utc::now() + margin
    }
}

/// Device-code handshake issued by the tracker: the user enters `user_code`
/// at `verification_url` while the client polls with `device_code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceCode {
    pub user_code: String,
    pub device_code: String,
    pub verification_url: String,
    /// Seconds until the code expires.
    pub expires_in: u64,
    /// Seconds to wait between polls.
    pub interval: u64,
}
