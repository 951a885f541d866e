//! Editor configuration.
//!
//! Settings are plain serde structs so hosts can keep them in a JSON file or
//! pass them inline. Every field has a default, so partial files are fine.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAGNIFIER_ZOOM, DEFAULT_MIN_RECT_SIZE_PX};
use crate::error::ConfigError;
use crate::keybindings::KeyBindings;
use crate::render::Palette;
use crate::sort::{SortAxis, SortDirection, SortOptions};

/// How chatty the editor's `log` output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    /// Every gesture transition and store write.
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter for the replay binary's logger. `RUST_LOG` still overrides it.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Default ordering, without a custom comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub axis: SortAxis,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn to_options(&self) -> SortOptions {
        SortOptions::new(self.axis, self.direction)
    }
}

/// When the editor re-sorts on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSortPolicy {
    /// After add, delete, a finished draw and normalize heights
    #[serde(default = "default_true")]
    pub after_edit: bool,
    /// After a move or resize ends
    #[serde(default = "default_true")]
    pub after_interaction: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AutoSortPolicy {
    fn default() -> Self {
        Self {
            after_edit: true,
            after_interaction: true,
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Minimum core width/height in canvas pixels
    #[serde(default = "default_min_rect_size_px")]
    pub min_rect_size_px: f64,

    #[serde(default)]
    pub sort: SortConfig,

    #[serde(default)]
    pub auto_sort: AutoSortPolicy,

    #[serde(default = "default_magnifier_zoom")]
    pub magnifier_zoom: f64,

    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub keybindings: KeyBindings,

    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_min_rect_size_px() -> f64 {
    DEFAULT_MIN_RECT_SIZE_PX
}

fn default_magnifier_zoom() -> f64 {
    DEFAULT_MAGNIFIER_ZOOM
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            min_rect_size_px: default_min_rect_size_px(),
            sort: SortConfig::default(),
            auto_sort: AutoSortPolicy::default(),
            magnifier_zoom: default_magnifier_zoom(),
            palette: Palette::default(),
            keybindings: KeyBindings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl EditorConfig {
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check version compatibility and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }
        if !self.min_rect_size_px.is_finite() || self.min_rect_size_px < 0.0 {
            return Err(ConfigError::invalid_value(
                "min_rect_size_px",
                format!("expected a non-negative number, got {}", self.min_rect_size_px),
            ));
        }
        if !self.magnifier_zoom.is_finite() || self.magnifier_zoom <= 0.0 {
            return Err(ConfigError::invalid_value(
                "magnifier_zoom",
                format!("expected a positive number, got {}", self.magnifier_zoom),
            ));
        }
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
