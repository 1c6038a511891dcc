//! Optional TOML settings for the CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chartkit::PlacementPolicy;
use serde::Deserialize;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "chartkit.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rule applied by `add-note` to occupied cells
    pub placement: PlacementPolicy,
    /// Pretty-print saved track files
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            placement: PlacementPolicy::Lenient,
            pretty: true,
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings {:?}", path.as_ref()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings")
    }
}
