use anyhow::{bail, Result};
use track_sync_settings::config::{Config, TrackerConfig};
use track_sync_settings::PathManager;

pub fn run(
    paths: &PathManager,
    client_id: Option<String>,
    client_secret: Option<String>,
    show: bool,
) -> Result<()> {
    let config_file = paths.config_file();

    if show {
        let config = Config::load(&config_file)?;
        println!("client_id:     {}", config.tracker.client_id);
        println!("client_secret: {}", mask(&config.tracker.client_secret));
        println!("sync_on_start: {}", config.sync.sync_on_start);
        return Ok(());
    }

    let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
        bail!("Provide both --client-id and --client-secret");
    };

    paths.ensure_directories()?;
    // Keep existing sync preferences when re-entering credentials
    let sync = Config::load(&config_file)
        .map(|config| config.sync)
        .unwrap_or_default();
    let config = Config {
        tracker: TrackerConfig {
            client_id,
            client_secret,
        },
        sync,
    };
    config.save(&config_file)?;

    println!("Tracker credentials saved to {}", config_file.display());
    Ok(())
}

fn mask(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", &secret[secret.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_only_the_tail() {
        assert_eq!(mask("abcdef123456"), "****3456");
        assert_eq!(mask("abc"), "****");
    }
}
