//! TOML-based application configuration.
//!
//! Stores the service base URL, focus timer defaults, and the Gemini
//! capture settings. Configuration lives at
//! `~/.config/daylist/config.toml` and is created with defaults on
//! first use.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::TimerSettings;

/// Remote task-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Focus timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Default focus interval in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u64,
    /// Break interval in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    /// Start the next interval automatically when one completes.
    #[serde(default)]
    pub auto_continue: bool,
}

/// Gemini capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// API key; the GEMINI_API_KEY environment variable takes over
    /// when this is empty.
    #[serde(default)]
    pub api_key: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/daylist/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_focus_minutes() -> u64 {
    10
}
fn default_break_minutes() -> u64 {
    5
}
fn default_gemini_model() -> String {
    "gemini-pro".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            auto_continue: false,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            focus: FocusConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::DataDir(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or create the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path, creating it with defaults when
    /// missing.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                let config = Self::default();
                config.save_to(path)?;
                Ok(config)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Timer settings derived from the focus section.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings::from_minutes(
            self.focus.focus_minutes,
            self.focus.break_minutes,
            self.focus.auto_continue,
        )
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "focus.focus_minutes" => Some(self.focus.focus_minutes.to_string()),
            "focus.break_minutes" => Some(self.focus.break_minutes.to_string()),
            "focus.auto_continue" => Some(self.focus.auto_continue.to_string()),
            "gemini.model" => Some(self.gemini.model.clone()),
            "gemini.api_key" => Some(self.gemini.api_key.clone()),
            _ => None,
        }
    }

    /// Set a config value by key and persist. Unknown keys and
    /// unparsable values are errors.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Apply a key/value pair without saving.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api.base_url" => {
                url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                    key: key.into(),
                    message: e.to_string(),
                })?;
                self.api.base_url = value.to_string();
            }
            "focus.focus_minutes" => {
                self.focus.focus_minutes = parse_value(key, value)?;
            }
            "focus.break_minutes" => {
                self.focus.break_minutes = parse_value(key, value)?;
            }
            "focus.auto_continue" => {
                self.focus.auto_continue = parse_value(key, value)?;
            }
            "gemini.model" => {
                self.gemini.model = value.to_string();
            }
            "gemini.api_key" => {
                self.gemini.api_key = value.to_string();
            }
            _ => return Err(ConfigError::UnknownKey(key.into())),
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.into(),
        message: e.to_string(),
    })
}
