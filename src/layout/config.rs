//! Configuration for the layout engine

use std::collections::HashMap;

use serde::Deserialize;

use super::tree::ElementKind;
use super::types::Size;

/// Default footprint for newly created elements of one kind
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KindDefaults {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub depth: Option<f64>,
}

impl KindDefaults {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Configuration options for layout computation and gap analysis
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Maximum perpendicular separation for two elements to count as neighbors
    pub proximity_threshold: f64,

    /// Gaps at or below this size are not reported
    pub min_gap_size: f64,

    /// Depth used in plan view for elements without one
    pub fallback_depth: f64,

    /// Per-kind overrides of the built-in default dimensions
    pub kind_defaults: HashMap<ElementKind, KindDefaults>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: 100.0,
            min_gap_size: 0.5,
            fallback_depth: 10.0,
            kind_defaults: HashMap::new(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighbor proximity threshold
    pub fn with_proximity_threshold(mut self, threshold: f64) -> Self {
        self.proximity_threshold = threshold;
        self
    }

    /// Set the minimum reported gap size
    pub fn with_min_gap_size(mut self, size: f64) -> Self {
        self.min_gap_size = size;
        self
    }

    /// Set the plan-view fallback depth
    pub fn with_fallback_depth(mut self, depth: f64) -> Self {
        self.fallback_depth = depth;
        self
    }

    /// Override the default dimensions of one element kind
    pub fn with_kind_defaults(mut self, kind: ElementKind, defaults: KindDefaults) -> Self {
        self.kind_defaults.insert(kind, defaults);
        self
    }

    /// Dimensions given to a new element of `kind`
    pub fn defaults_for(&self, kind: ElementKind) -> KindDefaults {
        self.kind_defaults
            .get(&kind)
            .copied()
            .unwrap_or_else(|| builtin_defaults(kind))
    }
}

fn builtin_defaults(kind: ElementKind) -> KindDefaults {
    let (width, height, depth) = match kind {
        ElementKind::Wall => (300.0, 250.0, None),
        ElementKind::Niche => (40.0, 40.0, Some(15.0)),
        ElementKind::Shelf => (50.0, 3.0, None),
        ElementKind::TvRecess => (120.0, 70.0, None),
        ElementKind::Fireplace => (100.0, 40.0, None),
        ElementKind::Custom => (50.0, 50.0, None),
    };
    KindDefaults {
        width,
        height,
        depth,
    }
}
