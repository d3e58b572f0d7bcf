pub mod auth;
pub mod config;
pub mod disconnect;
pub mod playback;
pub mod status;
pub mod sync;
