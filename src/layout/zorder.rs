//! Stacking order management
//!
//! Every element carries a `stack_key`; higher keys paint later. The order
//! is global over the flattened tree and ignores nesting. Ties between equal
//! keys are broken by pre-order position.

use crate::log::debug;

use super::tree::{Element, ElementId, ElementTree};

/// Key for a newly inserted element, one above the current maximum
pub fn next_stack_key(tree: &ElementTree) -> i64 {
    tree.iter().map(|el| el.stack_key).max().unwrap_or(-1) + 1
}

/// Elements in paint order, bottom first
pub fn paint_order(tree: &ElementTree) -> Vec<&Element> {
    let mut elements = tree.flatten();
    // Stable sort keeps pre-order for equal keys
    elements.sort_by_key(|el| el.stack_key);
    elements
}

/// Swap keys with the element directly above; no-op at the top or for unknown ids
pub fn bring_forward(tree: &mut ElementTree, id: ElementId) -> bool {
    swap_with_neighbor(tree, id, Step::Up)
}

/// Swap keys with the element directly below; no-op at the bottom or for unknown ids
pub fn send_backward(tree: &mut ElementTree, id: ElementId) -> bool {
    swap_with_neighbor(tree, id, Step::Down)
}

/// Place the element above everything else
pub fn bring_to_front(tree: &mut ElementTree, id: ElementId) -> bool {
    let Some(top) = tree.iter().map(|el| el.stack_key).max() else {
        return false;
    };
    set_key(tree, id, top + 1)
}

/// Place the element below everything else
pub fn send_to_back(tree: &mut ElementTree, id: ElementId) -> bool {
    let Some(bottom) = tree.iter().map(|el| el.stack_key).min() else {
        return false;
    };
    set_key(tree, id, bottom - 1)
}

/// Reassign dense keys `0..n` in current paint order
pub fn normalize(tree: &mut ElementTree) {
    let order: Vec<ElementId> = paint_order(tree).into_iter().map(|el| el.id).collect();
    for (rank, id) in order.into_iter().enumerate() {
        if let Some(element) = tree.find_mut(id) {
            element.stack_key = rank as i64;
        }
    }
    debug!(elements = tree.len(), "normalized stacking keys");
}

enum Step {
    Up,
    Down,
}

fn swap_with_neighbor(tree: &mut ElementTree, id: ElementId, step: Step) -> bool {
    let order: Vec<(ElementId, i64)> = paint_order(tree)
        .into_iter()
        .map(|el| (el.id, el.stack_key))
        .collect();
    let Some(index) = order.iter().position(|(candidate, _)| *candidate == id) else {
        debug!(%id, "stacking change on unknown element ignored");
        return false;
    };
    let neighbor = match step {
        Step::Up => order.get(index + 1),
        Step::Down => index.checked_sub(1).and_then(|i| order.get(i)),
    };
    let Some(&(neighbor_id, neighbor_key)) = neighbor else {
        return false;
    };
    let own_key = order[index].1;
    set_key(tree, id, neighbor_key) && set_key(tree, neighbor_id, own_key)
}

fn set_key(tree: &mut ElementTree, id: ElementId, key: i64) -> bool {
    match tree.find_mut(id) {
        Some(element) => {
            element.stack_key = key;
            true
        }
        None => {
            debug!(%id, "stacking change on unknown element ignored");
            false
        }
    }
}
