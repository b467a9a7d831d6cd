//! Gap analysis over resolved element trees

use pretty_assertions::assert_eq;
use wall_designer::{
    compute_gaps, resolve, Element, ElementId, ElementKind, ElementTree, Gap, GapAxis,
    LayoutConfig, Positioning, Size, ViewType,
};

fn pinned(id: u64, x: f64, y: f64, width: f64, height: f64) -> Element {
    Element::new(ElementId(id), ElementKind::Niche, Size::new(width, height))
        .with_positioning(Positioning::Absolute { x, y })
}

fn gaps(roots: Vec<Element>, view: ViewType) -> Vec<Gap> {
    let tree = resolve(&ElementTree::from_roots(roots), 300.0);
    compute_gaps(&tree.flatten(), view, &LayoutConfig::default())
}

#[test]
fn test_single_gap_reported_once() {
    let found = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 60.0, 0.0, 40.0, 40.0)],
        ViewType::Elevation,
    );

    assert_eq!(
        found,
        vec![Gap {
            axis: GapAxis::Horizontal,
            start: 40.0,
            end: 60.0,
            size: 20.0,
            perpendicular_center: 20.0,
        }]
    );
}

#[test]
fn test_far_apart_elements_have_no_horizontal_gap() {
    let found = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 60.0, 190.0, 40.0, 40.0)],
        ViewType::Elevation,
    );
    assert!(found.iter().all(|gap| gap.axis != GapAxis::Horizontal));
}

#[test]
fn test_beyond_threshold_on_both_axes() {
    let found = gaps(
        vec![pinned(1, 0.0, 0.0, 20.0, 20.0), pinned(2, 150.0, 150.0, 20.0, 20.0)],
        ViewType::Elevation,
    );
    assert!(found.is_empty());
}

#[test]
fn test_touching_and_tiny_gaps_are_ignored() {
    let touching = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 40.0, 0.0, 40.0, 40.0)],
        ViewType::Elevation,
    );
    assert!(touching.is_empty());

    let tiny = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 40.25, 0.0, 40.0, 40.0)],
        ViewType::Elevation,
    );
    assert!(tiny.is_empty());

    let visible = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 41.0, 0.0, 40.0, 40.0)],
        ViewType::Elevation,
    );
    assert_eq!(visible.len(), 1);
}

#[test]
fn test_perpendicular_center_spans_both_elements() {
    let found = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 60.0, 20.0, 40.0, 60.0)],
        ViewType::Elevation,
    );
    let horizontal: Vec<&Gap> = found
        .iter()
        .filter(|gap| gap.axis == GapAxis::Horizontal)
        .collect();
    assert_eq!(horizontal.len(), 1);
    assert_eq!(horizontal[0].perpendicular_center, 40.0);
}

#[test]
fn test_nearest_neighbor_only() {
    let found = gaps(
        vec![
            pinned(1, 0.0, 0.0, 40.0, 40.0),
            pinned(2, 50.0, 0.0, 40.0, 40.0),
            pinned(3, 100.0, 0.0, 40.0, 40.0),
        ],
        ViewType::Elevation,
    );
    let sizes: Vec<f64> = found.iter().map(|gap| gap.size).collect();
    assert_eq!(sizes, vec![10.0, 10.0]);
}

#[test]
fn test_vertical_gap_between_stacked_elements() {
    let found = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0), pinned(2, 0.0, 70.0, 40.0, 40.0)],
        ViewType::Elevation,
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].axis, GapAxis::Vertical);
    assert_eq!(found[0].size, 30.0);
    assert_eq!(found[0].perpendicular_center, 20.0);
}

#[test]
fn test_plan_view_uses_depth() {
    let shallow = pinned(1, 0.0, 0.0, 40.0, 40.0).with_depth(5.0);
    let below = pinned(2, 0.0, 20.0, 40.0, 40.0);

    // Overlapping in elevation, 15 apart in plan (depth 5 vs height 40)
    let elevation = gaps(vec![shallow.clone(), below.clone()], ViewType::Elevation);
    assert!(elevation.is_empty());

    let plan = gaps(vec![shallow, below], ViewType::Plan);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].size, 15.0);
}

#[test]
fn test_nested_elements_take_part() {
    let found = gaps(
        vec![pinned(1, 0.0, 0.0, 40.0, 40.0).with_child(pinned(2, 60.0, 0.0, 40.0, 40.0))],
        ViewType::Elevation,
    );
    assert_eq!(found.len(), 1);
}
