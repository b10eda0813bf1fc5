//! Configuration for the folio terminal portfolio.
//!
//! Settings are read from `config.toml` in the platform config directory
//! (`~/.config/folio/config.toml` on Linux). Every field is optional; a
//! missing file yields the defaults, and an unreadable or malformed file is
//! logged and replaced by the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use folio_core::{AnimationSpeed, ColorTheme, TimeFormat, defaults};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub time_format: TimeFormat,
    pub color_theme: ColorTheme,
    pub animation_speed: AnimationSpeed,
    /// Fixed seed for the decoration randomness; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub particle_count: usize,
    pub line_count: usize,
    /// Width of one terminal cell in virtual pixels.
    pub cell_width_px: u16,
    /// Height of one terminal cell in virtual pixels.
    pub cell_height_px: u16,
    pub timing: TimingConfig,
    pub content: ContentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            color_theme: ColorTheme::default(),
            animation_speed: AnimationSpeed::default(),
            seed: None,
            particle_count: defaults::PARTICLE_COUNT,
            line_count: defaults::LINE_COUNT,
            cell_width_px: 8,
            cell_height_px: 16,
            timing: TimingConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

/// Timer periods, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_ms: u64,
    pub clock_ms: u64,
    pub char_delay_ms: u64,
    pub command_pause_ms: u64,
    pub typewriter_start_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: defaults::TICK_MS,
            clock_ms: defaults::CLOCK_MS,
            char_delay_ms: defaults::CHAR_DELAY_MS,
            command_pause_ms: defaults::COMMAND_PAUSE_MS,
            typewriter_start_ms: defaults::TYPEWRITER_START_MS,
        }
    }
}

impl TimingConfig {
    /// Background tick period scaled by the animation speed.
    pub fn tick(&self, speed: AnimationSpeed) -> Duration {
        let scaled = (self.tick_ms as f32 * speed.tick_scale()).round() as u64;
        Duration::from_millis(scaled.max(1))
    }

    pub fn clock(&self) -> Duration {
        Duration::from_millis(self.clock_ms)
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn command_pause(&self) -> Duration {
        Duration::from_millis(self.command_pause_ms)
    }

    pub fn typewriter_start(&self) -> Duration {
        Duration::from_millis(self.typewriter_start_ms)
    }
}

/// Text tables used by the decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Commands replayed by the terminal panel.
    pub commands: Vec<String>,
    /// Candidate texts for the drifting code snippets.
    pub snippets: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            commands: defaults::COMMANDS.iter().map(|s| s.to_string()).collect(),
            snippets: defaults::SNIPPETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Path of the configuration file, if a home directory can be resolved.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the configuration from the default location.
    ///
    /// Never fails: problems are logged and the defaults are used instead.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            debug!("no config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Read and validate a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config.validated())
    }

    /// Replace values the presentation loop cannot work with.
    pub fn validated(mut self) -> Self {
        let timing = &mut self.timing;
        timing.tick_ms = timing.tick_ms.max(1);
        timing.clock_ms = timing.clock_ms.max(1);
        timing.char_delay_ms = timing.char_delay_ms.max(1);
        timing.command_pause_ms = timing.command_pause_ms.max(1);

        if self.content.snippets.is_empty() {
            warn!("snippet list is empty, restoring defaults");
            self.content.snippets = ContentConfig::default().snippets;
        }
        self.cell_width_px = self.cell_width_px.max(1);
        self.cell_height_px = self.cell_height_px.max(1);
        self
    }
}
