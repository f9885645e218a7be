use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name given to the trailing event channel.
pub const STIM_CHANNEL: &str = "STI 014";

/// Knobs for reading a recording. All fields are optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub stim_channel: String,
    /// Named electrode layout to resolve positions against
    pub layout: Option<String>,
    /// Where layout files live; falls back to the platform data directory
    pub layout_path: Option<PathBuf>,
    /// Accepted for compatibility; data is always loaded
    pub preload: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            stim_channel: STIM_CHANNEL.to_string(),
            layout: None,
            layout_path: None,
            preload: true,
        }
    }
}

impl ReaderOptions {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
