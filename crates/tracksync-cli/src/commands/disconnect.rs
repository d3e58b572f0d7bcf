use anyhow::Result;
use track_sync_settings::{PathManager, SettingsStore};

pub fn run(paths: &PathManager) -> Result<()> {
    let mut settings = SettingsStore::new(paths.settings_file());
    settings.load()?;
    settings.clear_session();
    settings.save()?;

    println!("Signed out, session cleared");
    Ok(())
}
