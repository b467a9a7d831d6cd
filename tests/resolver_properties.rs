//! Properties of position resolution over whole trees

use pretty_assertions::assert_eq;
use wall_designer::{
    resolve, Anchor, Element, ElementId, ElementKind, ElementTree, Point, Positioning, Size,
};

fn block(id: u64, width: f64, height: f64) -> Element {
    Element::new(ElementId(id), ElementKind::Custom, Size::new(width, height))
}

fn relative(id: u64, to: u64, anchor: Anchor, offset: Point) -> Element {
    block(id, 40.0, 40.0).with_positioning(Positioning::relative(ElementId(to), anchor, offset))
}

fn position(tree: &ElementTree, id: u64) -> Point {
    tree.find(ElementId(id))
        .and_then(|el| el.computed_position)
        .expect("element should be resolved")
}

fn positions(tree: &ElementTree) -> Vec<(ElementId, Option<Point>)> {
    tree.iter().map(|el| (el.id, el.computed_position)).collect()
}

#[test]
fn test_resolution_is_idempotent() {
    let tree = ElementTree::from_roots(vec![
        block(1, 120.0, 60.0).with_child(block(2, 30.0, 30.0)),
        relative(3, 1, Anchor::Below, Point::new(0.0, 5.0)),
        block(4, 200.0, 20.0),
        block(5, 10.0, 10.0).with_positioning(Positioning::Absolute { x: 7.0, y: 9.0 }),
    ]);

    let once = resolve(&tree, 300.0);
    let twice = resolve(&once, 300.0);
    assert_eq!(positions(&once), positions(&twice));
}

#[test]
fn test_absolute_position_ignores_nesting() {
    let pinned = || block(9, 20.0, 20.0).with_positioning(Positioning::Absolute { x: 50.0, y: 60.0 });

    let nested = ElementTree::from_roots(vec![block(1, 200.0, 200.0).with_child(
        block(2, 100.0, 100.0).with_child(block(3, 50.0, 50.0).with_child(pinned())),
    )]);
    let flat = ElementTree::from_roots(vec![block(1, 200.0, 200.0), pinned()]);

    assert_eq!(
        position(&resolve(&nested, 300.0), 9),
        position(&resolve(&flat, 300.0), 9)
    );
    assert_eq!(position(&resolve(&nested, 300.0), 9), Point::new(50.0, 60.0));
}

#[test]
fn test_three_wide_elements_wrap_on_third() {
    let tree = ElementTree::from_roots(vec![
        block(1, 120.0, 50.0),
        block(2, 120.0, 80.0),
        block(3, 120.0, 30.0),
    ]);

    let resolved = resolve(&tree, 300.0);
    assert_eq!(position(&resolved, 1), Point::new(0.0, 0.0));
    assert_eq!(position(&resolved, 2), Point::new(120.0, 0.0));
    assert_eq!(position(&resolved, 3), Point::new(0.0, 80.0));
}

#[test]
fn test_forward_reference_resolves_in_second_pass() {
    let tree = ElementTree::from_roots(vec![
        block(1, 100.0, 50.0),
        relative(2, 3, Anchor::NextTo, Point::origin()),
        block(3, 40.0, 40.0),
    ]);

    let resolved = resolve(&tree, 300.0);
    assert_eq!(position(&resolved, 3), Point::new(100.0, 0.0));
    assert_eq!(position(&resolved, 2), Point::new(140.0, 0.0));
}

#[test]
fn test_reference_cycle_terminates() {
    let tree = ElementTree::from_roots(vec![
        relative(1, 2, Anchor::NextTo, Point::new(5.0, 5.0)),
        relative(2, 1, Anchor::Below, Point::origin()),
    ]);

    // Pass one places both at their offsets, pass two anchors each to the
    // other's first-pass position and stops there
    let resolved = resolve(&tree, 300.0);
    assert_eq!(position(&resolved, 1), Point::new(45.0, 5.0));
    assert_eq!(position(&resolved, 2), Point::new(5.0, 45.0));
}

#[test]
fn test_dangling_reference_uses_offset() {
    let tree = ElementTree::from_roots(vec![
        block(1, 100.0, 50.0),
        relative(2, 99, Anchor::Below, Point::new(12.0, 34.0)),
        block(3, 40.0, 40.0),
    ]);

    let resolved = resolve(&tree, 300.0);
    assert_eq!(position(&resolved, 2), Point::new(12.0, 34.0));
    // Relative elements do not consume space in the flow
    assert_eq!(position(&resolved, 3), Point::new(100.0, 0.0));
}

#[test]
fn test_anchor_sides() {
    let reference =
        block(1, 100.0, 50.0).with_positioning(Positioning::Absolute { x: 100.0, y: 100.0 });
    let tree = ElementTree::from_roots(vec![
        reference,
        relative(2, 1, Anchor::NextTo, Point::new(10.0, 0.0)),
        relative(3, 1, Anchor::Below, Point::new(0.0, 10.0)),
        relative(4, 1, Anchor::Above, Point::origin()),
        relative(5, 1, Anchor::Inside, Point::new(5.0, 5.0)),
    ]);

    let resolved = resolve(&tree, 300.0);
    assert_eq!(position(&resolved, 2), Point::new(210.0, 100.0));
    assert_eq!(position(&resolved, 3), Point::new(100.0, 160.0));
    assert_eq!(position(&resolved, 4), Point::new(100.0, 60.0));
    assert_eq!(position(&resolved, 5), Point::new(105.0, 105.0));
}

#[test]
fn test_children_flow_from_parent_origin() {
    let tree = ElementTree::from_roots(vec![
        block(1, 100.0, 20.0),
        block(2, 150.0, 100.0)
            .with_child(block(3, 60.0, 30.0))
            .with_child(block(4, 60.0, 30.0)),
    ]);

    let resolved = resolve(&tree, 300.0);
    assert_eq!(position(&resolved, 2), Point::new(100.0, 0.0));
    assert_eq!(position(&resolved, 3), Point::new(100.0, 0.0));
    assert_eq!(position(&resolved, 4), Point::new(160.0, 0.0));
}

#[test]
fn test_deleting_parent_removes_descendants() {
    let mut tree = ElementTree::from_roots(vec![
        block(1, 10.0, 10.0)
            .with_child(block(2, 10.0, 10.0).with_child(block(3, 10.0, 10.0)))
            .with_child(block(4, 10.0, 10.0)),
        block(5, 10.0, 10.0),
    ]);

    tree.delete(ElementId(1));
    let remaining: Vec<ElementId> = tree.flatten().iter().map(|el| el.id).collect();
    assert_eq!(remaining, vec![ElementId(5)]);
}
