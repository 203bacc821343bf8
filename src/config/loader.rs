use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::types::{OptionName, Options};

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "CGR_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional settings from `config.toml`.
///
/// Every key is optional; empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub composer_path: Option<String>,
    pub base_dir: Option<String>,
    pub bin_dir: Option<String>,
    /// Write all composer output here instead of the terminal.
    pub output_file: Option<PathBuf>,
}

impl FileConfig {
    /// Returns the path to the configuration file.
    ///
    /// `$CGR_CONFIG` wins when set. Otherwise uses `~/.config/cgr/config.toml`
    /// on Unix, or the equivalent from `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path<F>(lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("cgr").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `FileConfig::default()`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply the file's option values on top of `options`.
    pub fn apply(&self, options: &Options) -> Options {
        let mut result = options.clone();
        for name in OptionName::ALL {
            if let Some(value) = self.value(name).filter(|v| !v.is_empty()) {
                result.set(name, value.to_string());
            }
        }
        result
    }

    /// Output file, unless the path is empty.
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn value(&self, name: OptionName) -> Option<&str> {
        match name {
            OptionName::ComposerPath => self.composer_path.as_deref(),
            OptionName::BaseDir => self.base_dir.as_deref(),
            OptionName::BinDir => self.bin_dir.as_deref(),
        }
    }
}
