use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use track_sync_core::{DevicePrompt, WatchlistRefresh};
use track_sync_models::DeviceCode;

/// Prints the device-code instructions to the terminal.
pub struct TerminalPrompt;

impl DevicePrompt for TerminalPrompt {
    fn show_device_code(&self, code: &DeviceCode) {
        println!();
        println!("  Visit {}", code.verification_url);
        println!("  and enter the code: {}", code.user_code);
        println!();
        println!("Waiting for approval...");
    }
}

/// The CLI has no watchlist provider; the hook resolves immediately so the
/// rest of the sync is unaffected.
pub struct NoWatchlist;

#[async_trait]
impl WatchlistRefresh for NoWatchlist {
    async fn refresh(&self, force: bool) -> Result<()> {
        debug!(force, "No watchlist provider configured, skipping refresh");
        Ok(())
    }
}
