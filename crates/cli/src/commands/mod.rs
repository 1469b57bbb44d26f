pub mod check;
pub mod parse;
pub mod render;

use rmrkl_config::AppConfig;
use std::path::Path;

/// Load the config from `path`, or the default location, with env overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => AppConfig::load()?,
    };
    Ok(config)
}
