//! Runtime configuration.
//!
//! Defaults are always available. With the `config` feature, values can also come from a
//! TOML file: an explicit `--config` path, or `<config dir>/ddexplorer/config.toml` when it
//! exists. Command-line flags are applied on top by the binary.

use crate::error::{DdError, Result};
use crate::filter::DEFAULT_DEBOUNCE_MS;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Name of a built-in color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ThemeName::Default),
            "monochrome" | "mono" => Ok(ThemeName::Monochrome),
            "high-contrast" | "high_contrast" => Ok(ThemeName::HighContrast),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Quiet period before typed filter input is committed.
    pub debounce_ms: u64,
    /// Terminals narrower than this start with the description column hidden.
    pub narrow_width: u16,
    /// Interval of the session tick that drives debounce deadlines.
    pub tick_ms: u64,
    pub theme: ThemeName,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            narrow_width: 100,
            tick_ms: 50,
            theme: ThemeName::Default,
        }
    }
}

impl ExplorerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DdError::config(e.to_string()))
    }

    /// Resolve the configuration for this run.
    ///
    /// An explicit path must exist; the default location is optional.
    #[cfg(feature = "config")]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read_file(path);
        }

        match dirs::config_dir().map(|dir| dir.join("ddexplorer").join("config.toml")) {
            Some(path) if path.is_file() => Self::read_file(&path),
            _ => {
                log::debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    #[cfg(not(feature = "config"))]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Err(DdError::config(format!(
                "cannot read {}: built without the `config` feature",
                path.display()
            ))),
            None => Ok(Self::default()),
        }
    }

    #[cfg(feature = "config")]
    fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DdError::file_error(format!("Failed to read {}", path.display()), e))?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
