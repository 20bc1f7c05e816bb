//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Background colour in hex (e.g., "#000000")
    #[serde(default = "default_background")]
    pub background: String,

    /// Graph layout
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Column graph layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph width in pixels
    #[serde(default = "default_width")]
    pub width: u16,

    /// Graph height in pixels
    #[serde(default = "default_height")]
    pub height: u16,

    /// Number of columns
    #[serde(default = "default_columns")]
    pub columns: u16,

    /// Height of each band in pixels
    #[serde(default = "default_window_height")]
    pub window_height: u16,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            columns: default_columns(),
            window_height: default_window_height(),
        }
    }
}

// Default value functions
fn default_background() -> String {
    "#000000".to_string()
}

fn default_width() -> u16 {
    240
}

fn default_height() -> u16 {
    320
}

fn default_columns() -> u16 {
    4
}

fn default_window_height() -> u16 {
    40
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: default_background(),
            graph: GraphConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.background, "#000000");
        assert_eq!(config.graph.width, 240);
        assert_eq!(config.graph.height, 320);
        assert_eq!(config.graph.columns, 4);
        assert_eq!(config.graph.window_height, 40);
    }

    #[test]
    fn test_partial_graph_section() {
        let config: Config = toml::from_str(
            r##"
            background = "#102030"

            [graph]
            columns = 8
            "##,
        )
        .unwrap();
        assert_eq!(config.background, "#102030");
        assert_eq!(config.graph.columns, 8);
        assert_eq!(config.graph.window_height, 40);
    }
}
