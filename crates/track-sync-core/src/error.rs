use thiserror::Error;
use track_sync_remote::RemoteError;

/// Failure during device-code authentication. Returned to the caller as a
/// value; the service has already cleared its persisted auth state by the
/// time one of these surfaces.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("device code request failed: {0}")]
    DeviceCode(#[source] RemoteError),

    #[error("device approval failed: {0}")]
    Poll(#[source] RemoteError),

    #[error("token import failed: {0}")]
    Import(#[source] RemoteError),
}
