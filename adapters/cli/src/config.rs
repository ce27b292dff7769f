//! Optional TOML settings for the command-line driver.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Filter used when neither `RUST_LOG` nor the config file names one.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings read from the `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Directory that relative save targets are resolved against.
    pub(crate) levels_dir: Option<PathBuf>,
    /// `tracing` filter directive applied when `RUST_LOG` is unset.
    pub(crate) log_filter: Option<String>,
}

impl Config {
    /// Reads the config file, falling back to defaults when no path is given
    /// or the file does not exist.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Log filter to install when `RUST_LOG` is unset.
    pub(crate) fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Resolves a save target, placing relative paths under `levels_dir`.
    pub(crate) fn resolve_save_path(&self, path: &Path) -> PathBuf {
        match &self.levels_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}
