//! Sidebar layout files.
//!
//! ```toml
//! title = "&6&lLobby"
//! animate_title = true
//! lines = ["&7Players: &a12", "", "&ewww.example.net"]
//!
//! [[keyed]]
//! index = 14
//! key = "&bCoins: "
//! value = "1250"
//!
//! [config]
//! color_marker = "&"
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sidebar_core::{ContentSource, SLOT_COUNT, SidebarConfig, ViewerId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    pub title: String,

    #[serde(default)]
    pub animate_title: bool,

    /// Plain lines, top to bottom.
    #[serde(default)]
    pub lines: Vec<String>,

    #[serde(default)]
    pub keyed: Vec<KeyedEntry>,

    #[serde(default)]
    pub config: SidebarConfig,
}

/// A keyed line with its initial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyedEntry {
    pub index: usize,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Layout {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid layout {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let layout: Self = toml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Keyed lines must sit above the plain lines, which fill slots from 0.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        let plain = self.lines.len().min(SLOT_COUNT);
        let mut seen = HashSet::new();
        for entry in &self.keyed {
            if entry.index >= SLOT_COUNT {
                bail!("keyed line index {} is outside 0..={}", entry.index, SLOT_COUNT - 1);
            }
            if entry.index < plain {
                bail!(
                    "keyed line index {} overlaps the {} plain lines",
                    entry.index,
                    plain
                );
            }
            if !seen.insert(entry.index) {
                bail!("keyed line index {} is used twice", entry.index);
            }
        }
        Ok(())
    }
}

impl ContentSource for Layout {
    fn title(&self, _viewer: ViewerId) -> String {
        self.title.clone()
    }

    fn lines(&self, _viewer: ViewerId) -> Vec<String> {
        self.lines.clone()
    }
}
