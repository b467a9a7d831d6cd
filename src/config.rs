//! Design defaults loaded from TOML
//!
//! A configuration file sets the starting canvas, the gap analysis
//! thresholds and per-kind default dimensions. Every key is optional and
//! falls back to the built-in defaults.
//!
//! ```toml
//! [metadata]
//! name = "Living room"
//!
//! [canvas]
//! width = 420
//! height = 260
//! snap_to_grid = false
//!
//! [layout]
//! proximity_threshold = 80
//!
//! [kinds.niche]
//! width = 30
//! height = 60
//! depth = 12
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::canvas::Canvas;
use crate::layout::{ElementKind, KindDefaults, LayoutConfig, Material, MaterialType};

/// Errors that can occur when loading or parsing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Starting point for new designs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesignConfig {
    /// Optional name for the configuration
    pub name: Option<String>,
    pub canvas: Canvas,
    pub layout: LayoutConfig,
}

/// TOML structure for deserializing configurations
#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    metadata: Option<TomlMetadata>,
    canvas: TomlCanvas,
    layout: TomlLayout,
    kinds: HashMap<ElementKind, KindDefaults>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlCanvas {
    name: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    depth: Option<f64>,
    material: Option<MaterialType>,
    scale: Option<f64>,
    show_grid: Option<bool>,
    grid_size: Option<f64>,
    snap_to_grid: Option<bool>,
    snap_to_elements: Option<bool>,
    auto_position: Option<bool>,
    show_all_distances: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlLayout {
    proximity_threshold: Option<f64>,
    min_gap_size: Option<f64>,
    fallback_depth: Option<f64>,
}

impl DesignConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = DesignConfig {
            name: parsed.metadata.and_then(|m| m.name),
            ..Self::default()
        };

        let c = parsed.canvas;
        let canvas = &mut config.canvas;
        if let Some(name) = c.name {
            canvas.name = name;
        }
        overlay(&mut canvas.dimensions.width, c.width);
        overlay(&mut canvas.dimensions.height, c.height);
        overlay(&mut canvas.dimensions.depth, c.depth);
        if let Some(material) = c.material {
            canvas.material = Material::new(material);
        }
        overlay(&mut canvas.scale, c.scale);
        overlay(&mut canvas.show_grid, c.show_grid);
        overlay(&mut canvas.grid_size, c.grid_size);
        overlay(&mut canvas.snap_to_grid, c.snap_to_grid);
        overlay(&mut canvas.snap_to_elements, c.snap_to_elements);
        overlay(&mut canvas.auto_position, c.auto_position);
        overlay(&mut canvas.show_all_distances, c.show_all_distances);

        let l = parsed.layout;
        let layout = &mut config.layout;
        overlay(&mut layout.proximity_threshold, l.proximity_threshold);
        overlay(&mut layout.min_gap_size, l.min_gap_size);
        overlay(&mut layout.fallback_depth, l.fallback_depth);
        layout.kind_defaults = parsed.kinds;

        Ok(config)
    }
}

fn overlay<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
