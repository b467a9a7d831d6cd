//! Layout engine for element positions, spacing and stacking
//!
//! This module takes an element tree and a canvas width and computes
//! canvas-absolute positions, then derives gap annotations and paint order
//! from the resolved tree.

pub mod config;
pub mod distances;
pub mod gaps;
pub mod resolver;
pub mod tree;
pub mod types;
pub mod zorder;

pub use config::{KindDefaults, LayoutConfig};
pub use distances::{edge_distances, EdgeDistances, Neighbor};
pub use gaps::{compute_gaps, Gap, GapAxis};
pub use resolver::{resolve, RESOLUTION_PASSES};
pub use tree::*;
pub use types::*;

use std::collections::HashSet;

/// A relative element whose reference does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingReference {
    pub element: ElementId,
    pub missing: ElementId,
}

/// List relative references that point at no element
///
/// Dangling references are legal (the element falls back to its offset);
/// this exists so a UI can flag them.
pub fn dangling_references(tree: &ElementTree) -> Vec<DanglingReference> {
    let defined: HashSet<ElementId> = tree.iter().map(|el| el.id).collect();

    tree.iter()
        .filter_map(|el| {
            let missing = el.positioning.reference()?;
            (!defined.contains(&missing)).then_some(DanglingReference {
                element: el.id,
                missing,
            })
        })
        .collect()
}
