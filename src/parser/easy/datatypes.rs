use anyhow::Result;
use serde::{Deserialize, Serialize};

// Enobio files only ever carry these two kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    Eeg,
    Stim,
}

impl ChannelKind {
    pub fn from_string(s: &str) -> Result<Self> {
        match s {
            "eeg" => Ok(ChannelKind::Eeg),
            "stim" => Ok(ChannelKind::Stim),
            _ => Err(anyhow::anyhow!("Unsupported channel kind: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Eeg => "eeg",
            ChannelKind::Stim => "stim",
        }
    }

    /// Whether the unit conversion factor applies to this channel.
    pub fn is_scaled(&self) -> bool {
        matches!(self, ChannelKind::Eeg)
    }
}
