use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "modalstack";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the user configuration, falling back to defaults when absent.
pub fn load() -> color_eyre::Result<AppConfig> {
    let Some(path) = config_path() else {
        tracing::debug!("no config directory found, using defaults");
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> color_eyre::Result<AppConfig> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config = parse(&content).wrap_err_with(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse(content: &str) -> color_eyre::Result<AppConfig> {
    Ok(toml::from_str(content)?)
}
