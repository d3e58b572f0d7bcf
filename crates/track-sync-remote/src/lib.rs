pub mod error;
pub mod traits;
pub mod trakt;

pub use error::RemoteError;
pub use traits::TrackerClient;
pub use trakt::TraktClient;
