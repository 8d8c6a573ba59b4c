use crate::loop_update_fps;
use ahash::AHashMap as HashMap;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Visual regime of an entity's engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AppearanceMode {
    /// Live B3/S23 simulation seeded by the entity's own setup code.
    #[default]
    #[serde(rename = "modified_gol")]
    ModifiedGoL,
    /// A single frozen phase of a catalog pattern.
    #[serde(rename = "static_pattern")]
    StaticPattern,
    /// A catalog oscillator or spaceship cycling through its period.
    #[serde(rename = "loop_pattern")]
    LoopPattern,
}

impl AppearanceMode {
    pub fn name(self) -> &'static str {
        match self {
            AppearanceMode::ModifiedGoL => "modified_gol",
            AppearanceMode::StaticPattern => "static_pattern",
            AppearanceMode::LoopPattern => "loop_pattern",
        }
    }

    /// Parses a mode name, ignoring case; the short forms `static` and `loop`
    /// are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modified_gol" | "modifiedgol" | "modified" | "gol" => {
                Some(AppearanceMode::ModifiedGoL)
            }
            "static_pattern" | "staticpattern" | "static" => Some(AppearanceMode::StaticPattern),
            "loop_pattern" | "looppattern" | "loop" => Some(AppearanceMode::LoopPattern),
            _ => None,
        }
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for AppearanceMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown appearance mode {:?}, using modified_gol", name);
            AppearanceMode::ModifiedGoL
        }))
    }
}

/// Per entity type choice of how its engines look.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceOverride {
    #[serde(default)]
    pub mode: AppearanceMode,
    /// Catalog pattern name, used by the static and loop modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Phase index to freeze on, used by the static mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

impl AppearanceOverride {
    pub fn modified_gol() -> Self {
        Self::default()
    }

    pub fn static_pattern(pattern: &str, phase: u32) -> Self {
        Self {
            mode: AppearanceMode::StaticPattern,
            pattern: Some(pattern.to_string()),
            period: Some(phase),
        }
    }

    pub fn loop_pattern(pattern: &str) -> Self {
        Self {
            mode: AppearanceMode::LoopPattern,
            pattern: Some(pattern.to_string()),
            period: None,
        }
    }
}

/// Shared appearance settings, written by the UI and read by entity setup.
///
/// One instance is owned by the host and passed by reference wherever
/// entities are (re)configured.
///
/// # Example
///
/// ```rust
/// use gol_effects::{AppearanceConfig, AppearanceMode};
///
/// let config = AppearanceConfig::from_json(
///     r#"{ "overrides": { "invaders": { "mode": "loop_pattern", "pattern": "GLIDER" } } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.override_for("invaders").unwrap().mode, AppearanceMode::LoopPattern);
/// assert_eq!(config.global_cell_size, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Overrides keyed by entity type, e.g. `"player"` or `"bullets"`.
    pub overrides: HashMap<String, AppearanceOverride>,
    /// Pixels per cell.
    pub global_cell_size: u32,
    /// Frames between phase changes of loop patterns.
    pub loop_update_rate: u32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            global_cell_size: 4,
            loop_update_rate: 6,
        }
    }
}

impl AppearanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("Invalid appearance configuration")
    }

    /// Reads a JSON configuration file, see [`AppearanceConfig::from_json`].
    pub fn from_file(path: &str) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read appearance configuration {}", path))?;
        Self::from_json(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize appearance configuration")
    }

    pub fn set_override(&mut self, entity_type: &str, appearance: AppearanceOverride) {
        self.overrides.insert(entity_type.to_string(), appearance);
    }

    pub fn clear_override(&mut self, entity_type: &str) -> Option<AppearanceOverride> {
        self.overrides.remove(entity_type)
    }

    pub fn override_for(&self, entity_type: &str) -> Option<&AppearanceOverride> {
        self.overrides.get(entity_type)
    }

    /// Cell size in pixels, never zero.
    pub fn cell_size(&self) -> u32 {
        self.global_cell_size.max(1)
    }

    /// Simulation rate of loop patterns derived from `loop_update_rate`.
    pub fn loop_update_fps(&self) -> f64 {
        loop_update_fps(self.loop_update_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppearanceConfig::from_json("{}").unwrap();
        assert_eq!(config, AppearanceConfig::default());
        assert_eq!(config.loop_update_fps(), 10.0);
        assert!(config.override_for("player").is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let config = AppearanceConfig::from_json(
            r#"{
                "global_cell_size": 0,
                "loop_update_rate": 30,
                "overrides": {
                    "player": { "mode": "static_pattern", "pattern": "PULSAR", "period": 1 },
                    "bullets": { "mode": "loop" },
                    "food": { "mode": "sparkle" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.cell_size(), 1);
        assert_eq!(config.loop_update_fps(), 2.0);
        assert_eq!(
            config.override_for("player"),
            Some(&AppearanceOverride::static_pattern("PULSAR", 1))
        );
        let bullets = config.override_for("bullets").unwrap();
        assert_eq!(bullets.mode, AppearanceMode::LoopPattern);
        assert_eq!(bullets.pattern, None);
        // unknown modes degrade to the live simulation
        assert_eq!(config.override_for("food").unwrap().mode, AppearanceMode::ModifiedGoL);
    }

    #[test]
    fn test_invalid_json() {
        assert!(AppearanceConfig::from_json("{ overrides: ").is_err());
        assert!(AppearanceConfig::from_file("/nonexistent/appearance.json").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppearanceConfig::new();
        config.set_override("invaders", AppearanceOverride::loop_pattern("GLIDER"));
        config.set_override("player", AppearanceOverride::modified_gol());
        let json = config.to_json().unwrap();
        assert!(json.contains("\"loop_pattern\""));
        assert_eq!(AppearanceConfig::from_json(&json).unwrap(), config);

        assert!(config.clear_override("invaders").is_some());
        assert!(config.clear_override("invaders").is_none());
    }
}
