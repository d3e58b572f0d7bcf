use anyhow::{bail, Result};
use track_sync_core::SyncAllReport;
use track_sync_settings::PathManager;

use crate::context;

pub async fn run(paths: &PathManager, force_watchlist: bool) -> Result<()> {
    let service = context::build_service(paths)?;
    context::connect_or_fail(&service).await?;

    let report = service.sync_all(force_watchlist).await;
    print_report(&report)
}

fn print_report(report: &SyncAllReport) -> Result<()> {
    if let Some(err) = &report.clear_error {
        bail!("Could not clear the watched database: {err}");
    }

    println!(
        "Movies:   {} written, {} skipped",
        report.movies.written, report.movies.skipped
    );
    println!(
        "Episodes: {} written, {} skipped",
        report.episodes.written, report.episodes.skipped
    );

    let mut failures = Vec::new();
    if let Some(err) = &report.movies.error {
        failures.push(format!("movies: {err}"));
    }
    if let Some(err) = &report.episodes.error {
        failures.push(format!("episodes: {err}"));
    }
    if let Some(err) = &report.watchlist_error {
        failures.push(format!("watchlist: {err}"));
    }
    if !failures.is_empty() {
        bail!("Sync finished with errors: {}", failures.join("; "));
    }

    Ok(())
}
