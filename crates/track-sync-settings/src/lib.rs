pub mod config;
pub mod paths;
pub mod settings;

pub use config::Config;
pub use paths::{container_base_path, PathManager};
pub use settings::SettingsStore;
