//! Per-element measurements: distance to each canvas edge and to the
//! closest overlapping neighbor on each side.

use super::tree::{Element, ElementId};
use super::types::{Size, ViewType};

/// Distance to one neighboring element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: ElementId,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistances {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub nearest_left: Option<Neighbor>,
    pub nearest_right: Option<Neighbor>,
    pub nearest_top: Option<Neighbor>,
    pub nearest_bottom: Option<Neighbor>,
}

/// Measure `element` against the canvas extent and the other elements
///
/// Left and right neighbors must overlap the element vertically, top and
/// bottom neighbors horizontally. Touching neighbors count with distance 0.
pub fn edge_distances(
    element: &Element,
    others: &[&Element],
    canvas: Size,
    view: ViewType,
    fallback_depth: f64,
) -> EdgeDistances {
    let own = element.view_bounds(view, fallback_depth);
    let mut result = EdgeDistances {
        left: own.x,
        top: own.y,
        right: canvas.width - own.right(),
        bottom: canvas.height - own.bottom(),
        nearest_left: None,
        nearest_right: None,
        nearest_top: None,
        nearest_bottom: None,
    };

    for other in others.iter().filter(|other| other.id != element.id) {
        let theirs = other.view_bounds(view, fallback_depth);
        let across_rows = own.vertical().overlaps(&theirs.vertical());
        let across_columns = own.horizontal().overlaps(&theirs.horizontal());

        if across_rows && theirs.right() <= own.x {
            closer(&mut result.nearest_left, other.id, own.x - theirs.right());
        }
        if across_rows && theirs.x >= own.right() {
            closer(&mut result.nearest_right, other.id, theirs.x - own.right());
        }
        if across_columns && theirs.bottom() <= own.y {
            closer(&mut result.nearest_top, other.id, own.y - theirs.bottom());
        }
        if across_columns && theirs.y >= own.bottom() {
            closer(&mut result.nearest_bottom, other.id, theirs.y - own.bottom());
        }
    }

    result
}

fn closer(slot: &mut Option<Neighbor>, id: ElementId, distance: f64) {
    if slot.map_or(true, |current| distance < current.distance) {
        *slot = Some(Neighbor { id, distance });
    }
}
