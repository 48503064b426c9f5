use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://appcostcalculator.onrender.com";
pub const DEFAULT_CONFIG_FILE: &str = "appcost.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log destination; without one the form runs with logging off
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            api: ApiConfig {
                base_url: default_base_url(),
            },
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration
///
/// Layers, later ones winning: built-in defaults, the TOML file at `path`
/// (optional), then `APPCOST_*` environment variables with `__` between
/// nested keys (e.g. `APPCOST_API__BASE_URL`).
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let config = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("log_level", "info")?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("APPCOST")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<(), AppError> {
    let base_url = cfg.api.base_url.trim();
    if base_url.is_empty() {
        return Err(AppError::ConfigError("api.base_url cannot be empty".to_string()));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(AppError::ConfigError(format!(
            "api.base_url must start with http:// or https://, got '{}'",
            base_url
        )));
    }

    if cfg.log_level.trim().is_empty() {
        return Err(AppError::ConfigError("log_level cannot be empty".to_string()));
    }

    Ok(())
}
