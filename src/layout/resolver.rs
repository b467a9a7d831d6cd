//! Position resolution
//!
//! Turns an element tree with mixed placement rules into canvas-absolute
//! positions. Resolution runs exactly [`RESOLUTION_PASSES`] traversals, and
//! each traversal reads references from a fixed snapshot:
//!
//! 1. The first pass has an empty snapshot, so every relative element sits
//!    at its offset.
//! 2. The second pass looks references up in the output of the first pass.
//!
//! Positions placed during a pass are never visible to that same pass.
//! Reference cycles are not iterated further and whatever the second pass
//! produces is final. A reference missing from the snapshot places the
//! element at its offset as if it were absolute.

use std::collections::HashMap;

use crate::log::debug;

use super::tree::{Anchor, Element, ElementId, ElementTree, Positioning};
use super::types::{BoundingBox, Point};

/// Number of traversals performed by [`resolve`]
pub const RESOLUTION_PASSES: usize = 2;

/// Resolve every element of `tree` against a canvas of `canvas_width`
///
/// Positions already present on the input are discarded first.
pub fn resolve(tree: &ElementTree, canvas_width: f64) -> ElementTree {
    let mut current = tree.clone();
    current.for_each_mut(|el| el.computed_position = None);

    for pass in 1..=RESOLUTION_PASSES {
        debug!(pass, elements = current.len(), "resolution pass");
        let mut resolver = Pass::reading(&current, canvas_width);
        let roots = resolver.place_group(current.roots(), Point::origin());
        current = ElementTree::from_roots(roots);
        if pass == RESOLUTION_PASSES {
            resolver.report_dangling();
        }
    }

    current
}

/// One traversal over the tree
struct Pass {
    canvas_width: f64,
    /// Rectangles from the previous pass, read-only during this one
    snapshot: HashMap<ElementId, BoundingBox>,
    unresolved: Vec<(ElementId, ElementId)>,
}

impl Pass {
    fn reading(tree: &ElementTree, canvas_width: f64) -> Self {
        let snapshot = tree
            .iter()
            .filter_map(|el| {
                el.computed_position
                    .map(|pos| (el.id, BoundingBox::from_parts(pos, el.dimensions)))
            })
            .collect();
        Self {
            canvas_width,
            snapshot,
            unresolved: Vec::new(),
        }
    }

    /// Place one sibling group whose auto flow starts at `start`
    fn place_group(&mut self, elements: &[Element], start: Point) -> Vec<Element> {
        let mut flow = Flow::new(start);
        elements
            .iter()
            .map(|element| self.place(element, &mut flow))
            .collect()
    }

    fn place(&mut self, element: &Element, flow: &mut Flow) -> Element {
        let position = match &element.positioning {
            Positioning::Absolute { x, y } => Point::new(*x, *y),
            Positioning::Relative {
                reference_id,
                anchor,
                offset,
            } => match self.snapshot.get(reference_id) {
                Some(reference) => anchored(reference, *anchor, *offset, element),
                None => {
                    self.unresolved.push((element.id, *reference_id));
                    *offset
                }
            },
            Positioning::Auto => flow.advance(
                element.dimensions.width,
                element.dimensions.height,
                self.canvas_width,
            ),
        };

        // Children flow from the parent's resolved origin but still wrap at the canvas width
        let children = self.place_group(&element.children, position);

        Element {
            computed_position: Some(position),
            children,
            ..without_children(element)
        }
    }

    /// After the second pass only references to missing elements stay unknown
    fn report_dangling(&self) {
        for (_element, _reference) in &self.unresolved {
            debug!(element = %_element, reference = %_reference, "dangling reference placed at offset");
        }
    }
}

/// Position of an element attached to `reference` at `anchor`
fn anchored(reference: &BoundingBox, anchor: Anchor, offset: Point, element: &Element) -> Point {
    let base = match anchor {
        Anchor::NextTo => Point::new(reference.right(), reference.y),
        Anchor::Below => Point::new(reference.x, reference.bottom()),
        Anchor::Above => Point::new(reference.x, reference.y - element.dimensions.height),
        Anchor::Inside => reference.origin(),
    };
    base.offset_by(offset)
}

/// Auto-flow cursor for one sibling group
struct Flow {
    start_x: f64,
    cursor: Point,
    row_height: f64,
}

impl Flow {
    fn new(start: Point) -> Self {
        Self {
            start_x: start.x,
            cursor: start,
            row_height: 0.0,
        }
    }

    fn advance(&mut self, width: f64, height: f64, wrap_width: f64) -> Point {
        if self.cursor.x + width > wrap_width && self.cursor.x > self.start_x {
            self.cursor.x = self.start_x;
            self.cursor.y += self.row_height;
            self.row_height = 0.0;
        }
        let position = self.cursor;
        self.cursor.x += width;
        self.row_height = self.row_height.max(height);
        position
    }
}

fn without_children(element: &Element) -> Element {
    Element {
        id: element.id,
        kind: element.kind,
        name: element.name.clone(),
        dimensions: element.dimensions,
        depth: element.depth,
        positioning: element.positioning.clone(),
        material: element.material.clone(),
        children: Vec::new(),
        parent_id: element.parent_id,
        computed_position: element.computed_position,
        stack_key: element.stack_key,
    }
}
