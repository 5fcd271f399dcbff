//! Sidebar configuration, loaded from TOML.
//!
//! ```toml
//! refresh_interval_ticks = 2
//! tick_millis = 50
//! color_marker = "&"
//!
//! [animation]
//! primary = "gold"
//! secondary = "white"
//! initial_cooldown = 5
//! wrap_cooldown = 50
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sidebar_text::{DEFAULT_COOLDOWN, Formatting, HighlightAnimation, MARKER, WRAP_COOLDOWN};

use crate::error::ConfigError;

// =============================================================================
// ROOT CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// Game ticks between two redraws.
    pub refresh_interval_ticks: u32,

    /// Length of one game tick.
    pub tick_millis: u64,

    /// User-facing marker translated to the escape marker before drawing.
    pub color_marker: char,

    pub animation: AnimationSettings,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ticks: 2,
            tick_millis: 50,
            color_marker: '&',
            animation: AnimationSettings::default(),
        }
    }
}

impl SidebarConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_ticks == 0 {
            return Err(ConfigError::invalid("refresh_interval_ticks must be at least 1"));
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::invalid("tick_millis must be at least 1"));
        }
        if self.color_marker == MARKER {
            return Err(ConfigError::invalid(format!(
                "color_marker cannot be the escape marker {MARKER}"
            )));
        }
        Ok(())
    }

    /// Time between two redraws.
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.saturating_mul(u64::from(self.refresh_interval_ticks)))
    }
}

// =============================================================================
// ANIMATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    pub primary: Formatting,
    pub secondary: Formatting,
    /// Frames shown before the first sweep.
    pub initial_cooldown: u32,
    /// Frames shown between two sweeps.
    pub wrap_cooldown: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            primary: Formatting::Gold,
            secondary: Formatting::White,
            initial_cooldown: DEFAULT_COOLDOWN,
            wrap_cooldown: WRAP_COOLDOWN,
        }
    }
}

impl AnimationSettings {
    /// A fresh animation of `text` using these settings.
    pub fn animate(&self, text: impl Into<String>) -> HighlightAnimation {
        HighlightAnimation::with_state(
            text,
            self.primary,
            self.secondary,
            self.initial_cooldown,
            0,
        )
        .with_wrap_cooldown(self.wrap_cooldown)
    }
}
