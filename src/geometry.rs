//! Channel position lookup.
//!
//! Resolving electrode positions from a named layout is the job of an outside
//! collaborator; the reader only needs something that implements
//! [`GeometryLookup`]. [`LayoutTable`] is a plain name → position table that
//! can be filled in memory or from a JSON layout file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// 3D electrode position, in the layout's own units.
pub type Position = [f64; 3];

/// Positions keyed by channel name. Ordered so output is deterministic.
pub type Geometry = BTreeMap<String, Position>;

pub trait GeometryLookup {
    /// Positions for the subset of `channel_names` the layout knows about.
    /// An empty map is a valid answer.
    fn resolve(&self, layout: &str, channel_names: &[String], search_path: &Path) -> Result<Geometry>;
}

/// Default directory searched for layout files.
pub fn default_search_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("easy_reader")
        .join("layouts")
}

/// In-memory layouts: layout name → channel name → position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutTable {
    layouts: HashMap<String, HashMap<String, Position>>,
}

impl LayoutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, layout: &str, channel: &str, position: Position) {
        self.layouts
            .entry(layout.to_string())
            .or_default()
            .insert(channel.to_string(), position);
    }

    /// Load `<dir>/<layout>.json`, a JSON object of `"name": [x, y, z]`.
    pub fn load_layout(&mut self, dir: &Path, layout: &str) -> Result<()> {
        let path = dir.join(format!("{layout}.json"));
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading layout file {}", path.display()))?;
        let positions: HashMap<String, Position> = serde_json::from_str(&content)
            .with_context(|| format!("parsing layout file {}", path.display()))?;
        self.layouts.insert(layout.to_string(), positions);
        Ok(())
    }
}

impl GeometryLookup for LayoutTable {
    fn resolve(&self, layout: &str, channel_names: &[String], search_path: &Path) -> Result<Geometry> {
        let positions = match self.layouts.get(layout) {
            Some(positions) => positions.clone(),
            None => {
                let mut loaded = LayoutTable::new();
                loaded.load_layout(search_path, layout)?;
                loaded.layouts.remove(layout).unwrap_or_default()
            }
        };
        Ok(channel_names
            .iter()
            .filter_map(|name| positions.get(name).map(|pos| (name.clone(), *pos)))
            .collect())
    }
}
