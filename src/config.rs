//! Configuration file support.
//!
//! The selector is configured once at startup: which slots it opens with, the
//! starting color, history depth, log verbosity and optional key code
//! overrides for the shortcut tracker.

use serde::{Deserialize, Serialize};
use tinct_ui::{KeyCodes, Platform, UNDO_STACK_LIMIT};

use crate::color::valid_html_color;
use crate::registry::DEFAULT_SLOTS;
use crate::selector::SelectorKind;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
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

/// Selector configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Slots the selector opens with, top to bottom
    #[serde(default = "default_initial_slots")]
    pub initial_slots: Vec<SelectorKind>,

    /// Starting color as `#rrggbb`
    #[serde(default = "default_initial_color")]
    pub initial_color: String,

    /// Background applied to HTML entries when the color is copied
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    /// Number of colors remembered for undo
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Key codes for shortcuts; detected from the platform when absent
    #[serde(default)]
    pub key_codes: Option<KeyCodes>,
}

fn default_initial_slots() -> Vec<SelectorKind> {
    DEFAULT_SLOTS.to_vec()
}

fn default_initial_color() -> String {
    "#000000".to_string()
}

fn default_highlight_color() -> String {
    "#ffff99".to_string()
}

fn default_history_limit() -> usize {
    UNDO_STACK_LIMIT
}

impl PickerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            initial_slots: default_initial_slots(),
            initial_color: default_initial_color(),
            highlight_color: default_highlight_color(),
            history_limit: default_history_limit(),
            log_level: LogLevel::default(),
            key_codes: None,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if !valid_html_color(&config.initial_color) {
            return Err(ConfigError::InvalidColor(config.initial_color));
        }

        Ok(config)
    }

    /// Key codes to use: the configured override, else the platform's table.
    pub fn key_codes(&self, platform: Platform) -> KeyCodes {
        self.key_codes
            .unwrap_or_else(|| KeyCodes::for_platform(platform))
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "tinct-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("tinct").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("tinct")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path`.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load configuration from `path` if the file exists.
    pub fn load_if_exists(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load configuration from the default path.
    /// Returns `Ok(None)` if there is no config file there.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_if_exists(&path),
            None => Ok(None),
        }
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Initial color is not an HTML color
    #[error("Invalid initial color {0:?}")]
    InvalidColor(String),

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
