//! Configuration management for photostamp.
//!
//! Configuration is TOML, loaded from a platform config directory (or an
//! explicit `--config` path). A missing file is written out with defaults;
//! a file that exists but cannot be read or parsed is fatal to the run.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for photostamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Footer geometry and output encoding
    pub footer: FooterConfig,

    /// Reverse-geocoding service settings
    pub geocode: GeocodeConfig,

    /// Input enumeration settings
    pub processing: ProcessingConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration, writing a default file if none exists yet.
    ///
    /// `path` overrides the default location. An existing file that cannot
    /// be read or parsed is an error — the caller treats that as fatal.
    pub fn load_or_init(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Self::default();
            config.write_to(&path)?;
            tracing::info!("Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    /// Load configuration without side effects: a missing file yields
    /// defaults, an unreadable one an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize and write this configuration to `path`, creating parent
    /// directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        let mk_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(mk_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(mk_err)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.photostamp.photostamp/config.toml
    /// - Linux: ~/.config/photostamp/config.toml
    ///
    /// Falls back to ~/.photostamp/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "photostamp", "photostamp")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".photostamp").join("config.toml")
            })
    }

    /// Get the resolved footer font path (with ~ expansion), if set.
    pub fn font_path(&self) -> Option<PathBuf> {
        self.footer.font_path.as_ref().map(|p| {
            let path_str = p.to_string_lossy().into_owned();
            let expanded = shellexpand::tilde(&path_str);
            PathBuf::from(expanded.into_owned())
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Validation(e.to_string()))
    }
}
