//! Handles settings for the CLI.
//!
//! Values are layered: built-in defaults, then the TOML file
//! (`config/microbiz.toml` unless `--config` is given), then `MICROBIZ_*`
//! environment variables. Nested keys use `__`, e.g.
//! `MICROBIZ_DISPLAY__CURRENCY_SYMBOL=€`.
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/microbiz.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Log level for the `microbiz` and `engine` targets.
    pub level: String,
    pub display: engine::Settings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            display: engine::Settings::default(),
        }
    }
}

/// Loads settings. An explicit `path` must exist; the default path is optional.
pub fn load(path: Option<&str>) -> Result<AppSettings> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(path.is_some()))
        .add_source(
            config::Environment::with_prefix("MICROBIZ")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
