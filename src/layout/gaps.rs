//! Gap analysis for spacing annotations
//!
//! For every element, finds the nearest neighbor to the right and the
//! nearest neighbor below, and reports the empty space in between. A
//! candidate only counts as a neighbor when it is within the proximity
//! threshold on the perpendicular axis.

use std::collections::HashSet;

use super::config::LayoutConfig;
use super::tree::{Element, ElementId};
use super::types::{BoundingBox, Interval, ViewType};

/// Axis a gap is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapAxis {
    Horizontal,
    Vertical,
}

/// Empty space between two neighboring elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    pub axis: GapAxis,
    /// Edge of the first element
    pub start: f64,
    /// Facing edge of the neighbor
    pub end: f64,
    pub size: f64,
    /// Midpoint of the combined extent of both elements on the other axis
    pub perpendicular_center: f64,
}

/// Compute de-duplicated gaps between resolved elements
///
/// `elements` is the pre-order flattening of a resolved tree; in the plan
/// view the vertical extent of each element is its depth.
pub fn compute_gaps(elements: &[&Element], view: ViewType, config: &LayoutConfig) -> Vec<Gap> {
    let boxes: Vec<(ElementId, BoundingBox)> = elements
        .iter()
        .map(|el| (el.id, el.view_bounds(view, config.fallback_depth)))
        .collect();

    let mut gaps = Vec::new();
    let mut seen: HashSet<(GapAxis, ElementId, ElementId)> = HashSet::new();

    for (id, bounds) in &boxes {
        for axis in [GapAxis::Horizontal, GapAxis::Vertical] {
            let Some((neighbor_id, neighbor, size)) = nearest(*id, bounds, &boxes, axis, config)
            else {
                continue;
            };
            if size <= config.min_gap_size {
                continue;
            }
            if !seen.insert(pair_key(axis, *id, neighbor_id)) {
                continue;
            }
            gaps.push(gap_between(bounds, &neighbor, axis, size));
        }
    }

    gaps
}

/// Nearest qualifying neighbor after `bounds` along `axis`
fn nearest(
    id: ElementId,
    bounds: &BoundingBox,
    boxes: &[(ElementId, BoundingBox)],
    axis: GapAxis,
    config: &LayoutConfig,
) -> Option<(ElementId, BoundingBox, f64)> {
    let (own_along, own_across) = split(bounds, axis);
    let mut best: Option<(ElementId, BoundingBox, f64)> = None;

    for (other_id, other) in boxes {
        if *other_id == id {
            continue;
        }
        let (other_along, other_across) = split(other, axis);
        if other_along.start <= own_along.end {
            continue;
        }
        if own_across.separation(&other_across) >= config.proximity_threshold {
            continue;
        }
        let size = other_along.start - own_along.end;
        if best.map_or(true, |(_, _, best_size)| size < best_size) {
            best = Some((*other_id, *other, size));
        }
    }

    best
}

fn gap_between(bounds: &BoundingBox, neighbor: &BoundingBox, axis: GapAxis, size: f64) -> Gap {
    let (own_along, own_across) = split(bounds, axis);
    let (other_along, other_across) = split(neighbor, axis);
    Gap {
        axis,
        start: own_along.end,
        end: other_along.start,
        size,
        perpendicular_center: own_across.union(&other_across).midpoint(),
    }
}

/// Extent along the gap axis and across it
fn split(bounds: &BoundingBox, axis: GapAxis) -> (Interval, Interval) {
    match axis {
        GapAxis::Horizontal => (bounds.horizontal(), bounds.vertical()),
        GapAxis::Vertical => (bounds.vertical(), bounds.horizontal()),
    }
}

fn pair_key(axis: GapAxis, a: ElementId, b: ElementId) -> (GapAxis, ElementId, ElementId) {
    if a <= b {
        (axis, a, b)
    } else {
        (axis, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tree::ElementKind;
    use crate::layout::types::{Point, Size};
    use pretty_assertions::assert_eq;

    fn placed(id: u64, x: f64, y: f64, width: f64, height: f64) -> Element {
        let mut element =
            Element::new(ElementId(id), ElementKind::Niche, Size::new(width, height));
        element.computed_position = Some(Point::new(x, y));
        element
    }

    fn gaps_of(elements: &[Element]) -> Vec<Gap> {
        let refs: Vec<&Element> = elements.iter().collect();
        compute_gaps(&refs, ViewType::Elevation, &LayoutConfig::default())
    }

    #[test]
    fn test_single_horizontal_gap() {
        let gaps = gaps_of(&[
            placed(1, 0.0, 0.0, 40.0, 40.0),
            placed(2, 60.0, 10.0, 40.0, 40.0),
        ]);
        assert_eq!(
            gaps,
            vec![Gap {
                axis: GapAxis::Horizontal,
                start: 40.0,
                end: 60.0,
                size: 20.0,
                perpendicular_center: 25.0,
            }]
        );
    }

    #[test]
    fn test_vertical_gap_center_uses_union() {
        let gaps = gaps_of(&[
            placed(1, 0.0, 0.0, 40.0, 40.0),
            placed(2, 30.0, 100.0, 50.0, 10.0),
        ]);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].axis, GapAxis::Vertical);
        assert_eq!(gaps[0].size, 60.0);
        assert_eq!(gaps[0].perpendicular_center, 40.0);
    }

    #[test]
    fn test_nearest_neighbor_wins() {
        let gaps = gaps_of(&[
            placed(1, 0.0, 0.0, 10.0, 10.0),
            placed(2, 50.0, 0.0, 10.0, 10.0),
            placed(3, 20.0, 0.0, 10.0, 10.0),
        ]);
        let from_first: Vec<_> = gaps.iter().filter(|g| g.start == 10.0).collect();
        assert_eq!(from_first.len(), 1);
        assert_eq!(from_first[0].end, 20.0);
    }

    #[test]
    fn test_far_perpendicular_is_not_a_neighbor() {
        let gaps = gaps_of(&[
            placed(1, 0.0, 0.0, 10.0, 10.0),
            placed(2, 20.0, 200.0, 10.0, 10.0),
        ]);
        assert!(gaps.iter().all(|g| g.axis != GapAxis::Horizontal));
    }

    #[test]
    fn test_tiny_gap_suppressed() {
        let gaps = gaps_of(&[
            placed(1, 0.0, 0.0, 10.0, 10.0),
            placed(2, 10.4, 0.0, 10.0, 10.0),
        ]);
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_plan_view_uses_depth() {
        let shelf = placed(1, 0.0, 0.0, 40.0, 3.0).with_depth(25.0);
        let niche = placed(2, 0.0, 30.0, 40.0, 40.0);
        let refs = vec![&shelf, &niche];

        let plan = compute_gaps(&refs, ViewType::Plan, &LayoutConfig::default());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].start, 25.0);
        assert_eq!(plan[0].size, 5.0);

        let elevation = compute_gaps(&refs, ViewType::Elevation, &LayoutConfig::default());
        assert_eq!(elevation[0].size, 27.0);
    }

    #[test]
    fn test_pair_key_is_unordered() {
        assert_eq!(
            pair_key(GapAxis::Vertical, ElementId(9), ElementId(2)),
            pair_key(GapAxis::Vertical, ElementId(2), ElementId(9))
        );
    }
}
