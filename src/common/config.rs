//! Configuration for the canvas window manager.
//!
//! Every tunable the engine consults lives here with a serde default, so a
//! missing file or a partial file behaves exactly like the stock setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub dock: DockSettings,
    pub log: LogSettings,
}

/// Tunables for workspace, window, and viewport behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasSettings {
    /// Seconds a fullscreen window may sit without input before the sweep
    /// restores it.
    pub idle_timeout_secs: u64,
    /// Period of the idle sweep tick, in milliseconds.
    pub sweep_period_ms: u64,
    /// Per-open offset applied on both axes so repeated opens do not stack
    /// perfectly.
    pub open_stagger_px: f64,
    pub default_window_width: f64,
    pub default_window_height: f64,
    /// Wheel delta to scale-delta conversion factor.
    pub zoom_sensitivity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        CanvasSettings {
            idle_timeout_secs: 10,
            sweep_period_ms: 1000,
            open_stagger_px: 20.0,
            default_window_width: 800.0,
            default_window_height: 600.0,
            zoom_sensitivity: 0.003,
            min_scale: 0.1,
            max_scale: 8.0,
        }
    }
}

impl CanvasSettings {
    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sweep_period_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DockSettings {
    pub default_left: f64,
    pub default_bottom: f64,
    /// Override for the persisted-position file. When unset the platform
    /// data directory is used.
    pub position_path: Option<PathBuf>,
}

impl Default for DockSettings {
    fn default() -> Self {
        DockSettings {
            default_left: 40.0,
            default_bottom: 40.0,
            position_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Default tracing filter, overridable with RUST_LOG.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self { LogSettings { filter: "info".into() } }
}

impl Config {
    /// Loads the config at `path`, or the default location when `path` is
    /// `None`. A missing file yields the defaults; an unreadable or invalid
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Config::default_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };
        if !path.exists() {
            debug!(?path, "no config file, using defaults");
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sanctum").join("config.toml"))
    }
}
