use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Minimum time between two repeated Up/Down navigation steps, in seconds.
pub const DEFAULT_KEY_REPEAT_INTERVAL: f32 = 0.12;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub navigator: NavigatorConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Allow more than one selected node
    pub multi_select: bool,
    /// Throttle for held arrow keys, in seconds
    pub key_repeat_interval: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Show hidden files by default
    pub show_hidden: bool,
    /// Maximum directory depth to load
    pub max_depth: usize,
    /// Columns of indentation per tree level
    pub indent: u16,
    /// Frame duration in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            multi_select: true,
            key_repeat_interval: DEFAULT_KEY_REPEAT_INTERVAL,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: 6,
            indent: 2,
            tick_rate_ms: 33,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/grove/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grove").join("config.toml"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let interval = self.navigator.key_repeat_interval;
        if !interval.is_finite() || interval < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "key_repeat_interval must be a non-negative number of seconds, got {interval}"
            )));
        }
        if self.browser.indent == 0 {
            return Err(ConfigError::Invalid("indent must be at least 1".into()));
        }
        if self.browser.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be at least 1".into()));
        }
        Ok(())
    }
}
