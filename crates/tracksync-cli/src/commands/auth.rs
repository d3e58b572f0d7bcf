use anyhow::Result;
use track_sync_settings::PathManager;

use crate::context;

pub async fn run(paths: &PathManager) -> Result<()> {
    let service = context::build_service(paths)?;
    service.authenticate().await?;
    println!("Signed in, watched history synced");
    Ok(())
}
