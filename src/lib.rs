//! Wall Designer - layout engine for walls, niches and shelves
//!
//! This library resolves a tree of wall elements into canvas positions,
//! measures the spacing between them and manages their stacking order.
//!
//! # Example
//!
//! ```rust
//! use wall_designer::{Design, ElementKind};
//!
//! let mut design = Design::new();
//! let wall = design.add(ElementKind::Wall, None).unwrap();
//! let niche = design.add(ElementKind::Niche, Some(wall)).unwrap();
//!
//! let placed = design.find(niche).unwrap();
//! assert_eq!(placed.position().x, 0.0);
//! ```

pub mod canvas;
pub mod config;
pub mod design;
pub mod error;
pub mod layout;
pub mod log;
pub mod report;
pub mod summary;
pub mod units;

pub use canvas::{Canvas, CanvasDimensions};
pub use config::{ConfigError, DesignConfig};
pub use design::{Design, DesignDocument, DesignObserver};
pub use error::{DesignError, DocumentError};
pub use layout::{
    compute_gaps, resolve, Anchor, Element, ElementId, ElementKind, ElementPatch, ElementTree,
    Gap, GapAxis, LayoutConfig, Point, Positioning, Size, ViewType,
};
pub use summary::AreaSummary;

/// Load a design document and render its resolved positions as a table
///
/// Convenience wrapper around [`Design::from_json`] and
/// [`report::positions_table`].
pub fn positions_report(source: &str) -> Result<String, DocumentError> {
    let design = Design::from_json(source)?;
    Ok(report::positions_table(&design))
}
