use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("device authorization denied by user")]
    AuthDenied,

    #[error("device code expired before approval")]
    CodeExpired,

    #[error("no access token - authenticate first")]
    NotAuthenticated,

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RemoteError {
    pub(crate) fn api(endpoint: &'static str, status: StatusCode, body: String) -> Self {
        Self::Api {
            endpoint,
            status,
            body,
        }
    }
}
