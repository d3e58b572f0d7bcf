use anyhow::Result;
use track_sync_models::MediaType;
use track_sync_settings::PathManager;

use crate::context;

pub async fn run(paths: &PathManager, media_type: MediaType, id: &str) -> Result<()> {
    let service = context::build_service(paths)?;
    context::connect_or_fail(&service).await?;

    let progress = service.playback_progress(media_type, id).await?;
    println!("{progress:.1}%");
    Ok(())
}
