//! User configuration.
//!
//! Stored as TOML at `<config_dir>/tubekeys/config.toml`, or wherever
//! `TUBEKEYS_CONFIG` points. Every field has a default, so a partial or
//! missing file is fine.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::player::input::{
    Action, KeyBindingTable, KeyDispatcher, SuppressDefaults, DEFAULT_SUPPRESSED,
    DEFAULT_VOLUME_STEP,
};
use crate::player::navigation::{SpeedMenu, DEFAULT_RATES};
use crate::player::session::DEFAULT_SEEK_OFFSET;
use crate::preview::DEFAULT_INTERVAL;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "TUBEKEYS_CONFIG";

/// Playback control settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Seconds moved per seek step
    pub seek_offset: f64,
    /// Volume change of the `-`/`+` keys
    pub volume_step: f64,
    /// Speed menu entries
    pub speed_rates: Vec<f64>,
    /// Keys whose default handling is suppressed
    pub suppress_defaults: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_offset: DEFAULT_SEEK_OFFSET,
            volume_step: DEFAULT_VOLUME_STEP,
            speed_rates: DEFAULT_RATES.to_vec(),
            suppress_defaults: DEFAULT_SUPPRESSED.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Hover preview settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Milliseconds each preview image stays on screen
    pub interval_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub preview: PreviewConfig,
    /// Extra or replacement key bindings, e.g. `"x" = "seek 3"`
    pub keys: BTreeMap<String, Action>,
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("tubekeys").join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.sanitize();
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Replace out-of-range values with their defaults.
    fn sanitize(&mut self) {
        let defaults = PlayerConfig::default();
        if !(self.player.seek_offset.is_finite() && self.player.seek_offset > 0.0) {
            warn!(value = self.player.seek_offset, "invalid seek_offset, using default");
            self.player.seek_offset = defaults.seek_offset;
        }
        if !(self.player.volume_step.is_finite()
            && self.player.volume_step > 0.0
            && self.player.volume_step <= 1.0)
        {
            warn!(value = self.player.volume_step, "invalid volume_step, using default");
            self.player.volume_step = defaults.volume_step;
        }
        if self.preview.interval_ms == 0 {
            warn!("preview interval_ms must be positive, using default");
            self.preview.interval_ms = PreviewConfig::default().interval_ms;
        }
    }

    /// Default bindings with the configured volume step and `[keys]` overrides.
    pub fn key_bindings(&self) -> KeyBindingTable {
        KeyBindingTable::with_volume_step(self.player.volume_step).with_overrides(&self.keys)
    }

    pub fn speed_menu(&self) -> SpeedMenu {
        SpeedMenu::new(self.player.speed_rates.iter().copied())
    }

    pub fn suppress_hook(&self) -> SuppressDefaults {
        SuppressDefaults::new(self.player.suppress_defaults.iter().cloned())
    }

    /// An uninstalled dispatcher wired with this configuration.
    pub fn dispatcher(&self) -> KeyDispatcher {
        KeyDispatcher::new(self.key_bindings()).with_hook(self.suppress_hook())
    }

    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(self.preview.interval_ms)
    }
}
