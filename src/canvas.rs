//! The wall surface elements are placed on

use serde::{Deserialize, Serialize};

use crate::layout::{Material, MaterialType, Point, Size, ViewType};
use crate::units::snap_to_grid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: f64,
    pub height: f64,
    /// Wall thickness, the vertical extent of the plan view
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Canvas {
    pub name: String,
    pub dimensions: CanvasDimensions,
    pub material: Material,
    /// Drawing scale, 20 means 1:20
    pub scale: f64,
    pub show_grid: bool,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub snap_to_elements: bool,
    pub auto_position: bool,
    /// Whether gap annotations are computed
    pub show_all_distances: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            name: "New Design".to_string(),
            dimensions: CanvasDimensions {
                width: 300.0,
                height: 250.0,
                depth: 30.0,
            },
            material: Material::new(MaterialType::Drywall),
            scale: 20.0,
            show_grid: true,
            grid_size: 10.0,
            snap_to_grid: true,
            snap_to_elements: true,
            auto_position: true,
            show_all_distances: false,
        }
    }
}

impl Canvas {
    /// Visible surface for a view: width x height, or width x depth in plan
    pub fn extent(&self, view: ViewType) -> Size {
        match view {
            ViewType::Elevation => Size::new(self.dimensions.width, self.dimensions.height),
            ViewType::Plan => Size::new(self.dimensions.width, self.dimensions.depth),
        }
    }

    /// Convert centimeters to screen pixels at the canvas scale
    pub fn to_pixels(&self, cm: f64) -> f64 {
        cm / self.scale * 50.0
    }

    /// Convert screen pixels back to centimeters
    pub fn to_cm(&self, px: f64) -> f64 {
        px / 50.0 * self.scale
    }

    /// Round a pointer position to the grid when snapping is on
    ///
    /// Interactive callers apply this before [`Design::move_to`], which
    /// stores whatever coordinates it is given.
    ///
    /// [`Design::move_to`]: crate::Design::move_to
    pub fn snap(&self, point: Point) -> Point {
        if !self.snap_to_grid {
            return point;
        }
        Point::new(
            snap_to_grid(point.x, self.grid_size),
            snap_to_grid(point.y, self.grid_size),
        )
    }
}
