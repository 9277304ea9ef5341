//! Application settings.
//!
//! Settings live in `config.json` in the data directory. A missing file means
//! defaults; nothing has to be configured before first use.
//!
//! The focus bar opacity is clamped to [`MIN_OPACITY`, `MAX_OPACITY`] every
//! time it is read or written. A missing, non-finite or unreadable value
//! reads as [`DEFAULT_OPACITY`].
//!
//! ```rust,no_run
//! use focusbar::libs::config::FocusBarSettings;
//!
//! FocusBarSettings::save_opacity(0.6)?;
//! assert_eq!(FocusBarSettings::load_opacity(), 0.6);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const MIN_OPACITY: f64 = 0.2;
pub const MAX_OPACITY: f64 = 1.0;
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Focus bar appearance and refresh behaviour.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FocusBarConfig {
    /// Always accessed through [`FocusBarConfig::opacity`] and
    /// [`FocusBarConfig::set_opacity`], which apply the clamp.
    #[serde(default = "default_opacity")]
    opacity: f64,

    /// Seconds between refreshes when the bar is kept on screen.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Width of the rendered bar in columns.
    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_opacity() -> f64 {
    DEFAULT_OPACITY
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_width() -> usize {
    80
}

impl Default for FocusBarConfig {
    fn default() -> Self {
        FocusBarConfig {
            opacity: DEFAULT_OPACITY,
            refresh_interval: default_refresh_interval(),
            width: default_width(),
        }
    }
}

impl FocusBarConfig {
    pub fn opacity(&self) -> f64 {
        clamp_opacity(self.opacity)
    }

    pub fn set_opacity(&mut self, value: f64) {
        self.opacity = clamp_opacity(value);
    }
}

/// Clamps an opacity into the allowed range; non-finite values become the
/// default.
pub fn clamp_opacity(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_OPACITY;
    }
    value.clamp(MIN_OPACITY, MAX_OPACITY)
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_bar: Option<FocusBarConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn focus_bar(&self) -> FocusBarConfig {
        self.focus_bar.clone().unwrap_or_default()
    }
}

/// Read/write access to the persisted opacity setting.
pub struct FocusBarSettings;

impl FocusBarSettings {
    pub fn load_opacity() -> f64 {
        match Config::read() {
            Ok(config) => config.focus_bar().opacity(),
            Err(e) => {
                msg_warning!(Message::ConfigReadFailed(e.to_string()));
                DEFAULT_OPACITY
            }
        }
    }

    pub fn load_opacity_from(path: &Path) -> f64 {
        Config::read_from(path)
            .map(|config| config.focus_bar().opacity())
            .unwrap_or(DEFAULT_OPACITY)
    }

    /// Stores `value` clamped and returns what was stored.
    pub fn save_opacity(value: f64) -> Result<f64> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::save_opacity_to(&config_file_path, value)
    }

    /// An unreadable config file is replaced rather than blocking the write.
    pub fn save_opacity_to(path: &Path, value: f64) -> Result<f64> {
        let mut config = Config::read_from(path).unwrap_or_default();
        let mut focus_bar = config.focus_bar();
        focus_bar.set_opacity(value);
        let stored = focus_bar.opacity();
        config.focus_bar = Some(focus_bar);
        config.save_to(path)?;
        Ok(stored)
    }
}
