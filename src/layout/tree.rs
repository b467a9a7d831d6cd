//! Element tree store
//!
//! Owns the hierarchy of design elements. Every read goes through the
//! pre-order [`Preorder`] iterator and every write through [`find_in_mut`],
//! so lookups, flattening and mutation agree on ordering and nesting.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{BoundingBox, Point, Size, ViewType};

/// Stable identity of an element, never reused within a design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of design element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Wall,
    Niche,
    Shelf,
    TvRecess,
    Fireplace,
    Custom,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Wall,
        ElementKind::Niche,
        ElementKind::Shelf,
        ElementKind::TvRecess,
        ElementKind::Fireplace,
        ElementKind::Custom,
    ];

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Wall => "Wall Structure",
            ElementKind::Niche => "Niche",
            ElementKind::Shelf => "Shelf",
            ElementKind::TvRecess => "TV Recess",
            ElementKind::Fireplace => "Fireplace",
            ElementKind::Custom => "Custom Shape",
        }
    }

    /// Keyword used in documents and on the command line
    pub fn keyword(&self) -> &'static str {
        match self {
            ElementKind::Wall => "wall",
            ElementKind::Niche => "niche",
            ElementKind::Shelf => "shelf",
            ElementKind::TvRecess => "tv-recess",
            ElementKind::Fireplace => "fireplace",
            ElementKind::Custom => "custom",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

/// Surface material of an element or the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialType {
    #[default]
    Drywall,
    Wood,
    Glass,
    Metal,
    Stone,
    Mdf,
}

impl MaterialType {
    /// Swatch color used when no override is set
    pub fn default_color(&self) -> &'static str {
        match self {
            MaterialType::Drywall => "#e5e5e5",
            MaterialType::Wood => "#a0714a",
            MaterialType::Glass => "rgba(200, 230, 255, 0.6)",
            MaterialType::Metal => "#71717a",
            MaterialType::Stone => "#9ca3af",
            MaterialType::Mdf => "#d4b896",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "type")]
    pub kind: MaterialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Material {
    pub fn new(kind: MaterialType) -> Self {
        Self {
            kind,
            color: Some(kind.default_color().to_string()),
            label: None,
        }
    }

    /// Override color, falling back to the material swatch
    pub fn color(&self) -> &str {
        self.color
            .as_deref()
            .unwrap_or_else(|| self.kind.default_color())
    }
}

/// Side of the reference element a relative element attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// To the right, top edges aligned
    #[default]
    NextTo,
    /// Underneath, left edges aligned
    Below,
    /// On top, left edges aligned
    Above,
    /// At the reference's origin
    Inside,
}

/// Placement rule of an element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    tag = "mode",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Positioning {
    /// Left-to-right, top-to-bottom flow packing
    #[default]
    Auto,
    /// Fixed canvas coordinates regardless of nesting
    Absolute { x: f64, y: f64 },
    /// Anchored to any other element in the tree
    Relative {
        reference_id: ElementId,
        #[serde(default)]
        anchor: Anchor,
        #[serde(default)]
        offset: Point,
    },
}

impl Positioning {
    pub fn absolute(position: Point) -> Self {
        Positioning::Absolute {
            x: position.x,
            y: position.y,
        }
    }

    pub fn relative(reference_id: ElementId, anchor: Anchor, offset: Point) -> Self {
        Positioning::Relative {
            reference_id,
            anchor,
            offset,
        }
    }

    /// Id this rule depends on, if any
    pub fn reference(&self) -> Option<ElementId> {
        match self {
            Positioning::Relative { reference_id, .. } => Some(*reference_id),
            _ => None,
        }
    }
}

/// A placed rectangular design unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    #[serde(default)]
    pub name: String,
    pub dimensions: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default)]
    pub positioning: Positioning,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub children: Vec<Element>,
    /// Owner, kept for lookups only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    /// Canvas-absolute position, valid after a resolution pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_position: Option<Point>,
    #[serde(default)]
    pub stack_key: i64,
}

impl Element {
    /// A bare element with `Auto` positioning and no children
    pub fn new(id: ElementId, kind: ElementKind, dimensions: Size) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            dimensions,
            depth: None,
            positioning: Positioning::Auto,
            material: Material::default(),
            children: Vec::new(),
            parent_id: None,
            computed_position: None,
            stack_key: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_stack_key(mut self, key: i64) -> Self {
        self.stack_key = key;
        self
    }

    pub fn with_child(mut self, mut child: Element) -> Self {
        child.parent_id = Some(self.id);
        self.children.push(child);
        self
    }

    /// Resolved position, or the origin before resolution
    pub fn position(&self) -> Point {
        self.computed_position.unwrap_or_default()
    }

    /// Elevation-view rectangle at the resolved position
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_parts(self.position(), self.dimensions)
    }

    /// Rectangle as seen in `view`; the plan view uses depth as the vertical extent
    pub fn view_bounds(&self, view: ViewType, fallback_depth: f64) -> BoundingBox {
        match view {
            ViewType::Elevation => self.bounds(),
            ViewType::Plan => BoundingBox::from_parts(
                self.position(),
                Size::new(
                    self.dimensions.width,
                    self.depth.unwrap_or(fallback_depth),
                ),
            ),
        }
    }
}

/// Field-by-field partial update of an element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub kind: Option<ElementKind>,
    pub dimensions: Option<Size>,
    /// `Some(None)` clears the depth
    pub depth: Option<Option<f64>>,
    pub positioning: Option<Positioning>,
    pub material: Option<Material>,
    pub stack_key: Option<i64>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn dimensions(mut self, width: f64, height: f64) -> Self {
        self.dimensions = Some(Size::new(width, height));
        self
    }

    pub fn depth(mut self, depth: Option<f64>) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = Some(positioning);
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn stack_key(mut self, key: i64) -> Self {
        self.stack_key = Some(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `element`
    pub fn apply(&self, element: &mut Element) {
        if let Some(name) = &self.name {
            element.name = name.clone();
        }
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(dimensions) = self.dimensions {
            element.dimensions = dimensions;
        }
        if let Some(depth) = self.depth {
            element.depth = depth;
        }
        if let Some(positioning) = &self.positioning {
            element.positioning = positioning.clone();
        }
        if let Some(material) = &self.material {
            element.material = material.clone();
        }
        if let Some(key) = self.stack_key {
            element.stack_key = key;
        }
    }
}

/// The hierarchical collection of elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTree {
    roots: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: Vec<Element>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Element> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of elements at every depth
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order traversal, parents before children
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(&self.roots)
    }

    /// Pre-order flattening used by renderers and the gap analyzer
    pub fn flatten(&self) -> Vec<&Element> {
        self.iter().collect()
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.iter().find(|el| el.id == id)
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        find_in_mut(&mut self.roots, id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    /// Largest id in use
    pub fn max_id(&self) -> Option<ElementId> {
        self.iter().map(|el| el.id).max()
    }

    /// First id that occurs more than once, if any
    pub fn duplicate_id(&self) -> Option<ElementId> {
        let mut seen = HashSet::new();
        self.iter().map(|el| el.id).find(|id| !seen.insert(*id))
    }

    /// Apply `patch` to the element with `id`; returns false if it does not exist
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                patch.apply(element);
                true
            }
            None => false,
        }
    }

    /// Remove an element and its whole subtree, wherever it is nested
    pub fn delete(&mut self, id: ElementId) -> Option<Element> {
        remove_from(&mut self.roots, id)
    }

    /// Append `element` under `parent`, or at the root level when `parent` is `None`
    ///
    /// Returns false, leaving the tree untouched, if the parent does not exist.
    pub fn add_child(&mut self, parent: Option<ElementId>, mut element: Element) -> bool {
        element.parent_id = parent;
        match parent {
            None => {
                self.roots.push(element);
                true
            }
            Some(parent_id) => match self.find_mut(parent_id) {
                Some(owner) => {
                    owner.children.push(element);
                    true
                }
                None => false,
            },
        }
    }

    /// Reorder the root list. Unknown ids are ignored and roots missing from
    /// `order` keep their relative order after the listed ones.
    pub fn reorder_roots(&mut self, order: &[ElementId]) {
        let mut remaining = std::mem::take(&mut self.roots);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in order {
            if let Some(index) = remaining.iter().position(|el| el.id == *id) {
                reordered.push(remaining.remove(index));
            }
        }
        reordered.append(&mut remaining);
        self.roots = reordered;
    }

    /// Visit every element mutably in pre-order
    pub fn for_each_mut(&mut self, mut visit: impl FnMut(&mut Element)) {
        fn walk(elements: &mut [Element], visit: &mut impl FnMut(&mut Element)) {
            for element in elements {
                visit(element);
                walk(&mut element.children, visit);
            }
        }
        walk(&mut self.roots, &mut visit);
    }

    /// Rewrite every `parent_id` from the ownership structure
    pub fn relink_parents(&mut self) {
        fn walk(elements: &mut [Element], parent: Option<ElementId>) {
            for element in elements {
                element.parent_id = parent;
                let id = element.id;
                walk(&mut element.children, Some(id));
            }
        }
        walk(&mut self.roots, None);
    }
}

/// Pre-order iterator over a forest of elements
pub struct Preorder<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Preorder<'a> {
    fn new(roots: &'a [Element]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

fn find_in_mut(elements: &mut [Element], id: ElementId) -> Option<&mut Element> {
    for element in elements {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = find_in_mut(&mut element.children, id) {
            return Some(found);
        }
    }
    None
}

fn remove_from(elements: &mut Vec<Element>, id: ElementId) -> Option<Element> {
    if let Some(index) = elements.iter().position(|el| el.id == id) {
        return Some(elements.remove(index));
    }
    elements
        .iter_mut()
        .find_map(|element| remove_from(&mut element.children, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn niche(id: u64) -> Element {
        Element::new(ElementId(id), ElementKind::Niche, Size::new(40.0, 40.0))
    }

    fn sample_tree() -> ElementTree {
        // 1 { 2 { 3 } 4 } 5
        ElementTree::from_roots(vec![
            niche(1)
                .with_child(niche(2).with_child(niche(3)))
                .with_child(niche(4)),
            niche(5),
        ])
    }

    fn ids(tree: &ElementTree) -> Vec<u64> {
        tree.iter().map(|el| el.id.0).collect()
    }

    #[test]
    fn test_preorder_flatten() {
        assert_eq!(ids(&sample_tree()), vec![1, 2, 3, 4, 5]);
        assert_eq!(sample_tree().len(), 5);
    }

    #[test]
    fn test_find_nested() {
        let tree = sample_tree();
        let found = tree.find(ElementId(3)).expect("nested element");
        assert_eq!(found.parent_id, Some(ElementId(2)));
        assert!(tree.find(ElementId(42)).is_none());
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut tree = sample_tree();
        let removed = tree.delete(ElementId(2)).expect("element exists");
        assert_eq!(removed.children.len(), 1);
        assert_eq!(ids(&tree), vec![1, 4, 5]);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut tree = sample_tree();
        assert!(tree.delete(ElementId(99)).is_none());
        assert_eq!(tree, sample_tree());
    }

    #[test]
    fn test_add_child_under_parent() {
        let mut tree = sample_tree();
        assert!(tree.add_child(Some(ElementId(4)), niche(6)));
        assert_eq!(ids(&tree), vec![1, 2, 3, 4, 6, 5]);
        assert_eq!(tree.find(ElementId(6)).unwrap().parent_id, Some(ElementId(4)));
    }

    #[test]
    fn test_add_child_missing_parent() {
        let mut tree = sample_tree();
        assert!(!tree.add_child(Some(ElementId(77)), niche(6)));
        assert_eq!(tree, sample_tree());
    }

    #[test]
    fn test_update_applies_patch() {
        let mut tree = sample_tree();
        let patch = ElementPatch::new()
            .name("TV")
            .dimensions(120.0, 70.0)
            .depth(Some(12.0))
            .positioning(Positioning::Absolute { x: 5.0, y: 6.0 });
        assert!(tree.update(ElementId(3), &patch));

        let updated = tree.find(ElementId(3)).unwrap();
        assert_eq!(updated.name, "TV");
        assert_eq!(updated.dimensions, Size::new(120.0, 70.0));
        assert_eq!(updated.depth, Some(12.0));
        assert_eq!(updated.positioning, Positioning::Absolute { x: 5.0, y: 6.0 });
        assert_eq!(updated.kind, ElementKind::Niche);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut tree = sample_tree();
        assert!(!tree.update(ElementId(99), &ElementPatch::new().name("x")));
        assert_eq!(tree, sample_tree());
    }

    #[test]
    fn test_patch_clears_depth() {
        let mut element = niche(1).with_depth(15.0);
        ElementPatch::new().depth(None).apply(&mut element);
        assert_eq!(element.depth, None);
        assert!(ElementPatch::new().is_empty());
    }

    #[test]
    fn test_reorder_roots() {
        let mut tree = ElementTree::from_roots(vec![niche(1), niche(2), niche(3)]);
        tree.reorder_roots(&[ElementId(3), ElementId(9), ElementId(1)]);
        assert_eq!(ids(&tree), vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicate_id() {
        let tree = ElementTree::from_roots(vec![niche(1).with_child(niche(2)), niche(2)]);
        assert_eq!(tree.duplicate_id(), Some(ElementId(2)));
        assert_eq!(sample_tree().duplicate_id(), None);
    }

    #[test]
    fn test_relink_parents() {
        let mut tree = sample_tree();
        tree.for_each_mut(|el| el.parent_id = Some(ElementId(99)));
        tree.relink_parents();
        assert_eq!(tree.find(ElementId(1)).unwrap().parent_id, None);
        assert_eq!(tree.find(ElementId(3)).unwrap().parent_id, Some(ElementId(2)));
    }

    #[test]
    fn test_kind_keywords() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(ElementKind::from_keyword("sofa"), None);
    }

    #[test]
    fn test_positioning_serde_shape() {
        let rel = Positioning::relative(ElementId(7), Anchor::Below, Point::new(1.0, 2.0));
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "relative",
                "referenceId": 7,
                "anchor": "below",
                "offset": { "x": 1.0, "y": 2.0 }
            })
        );
        let auto: Positioning = serde_json::from_str(r#"{"mode":"auto"}"#).unwrap();
        assert_eq!(auto, Positioning::Auto);
    }

    #[test]
    fn test_plan_view_bounds_use_depth() {
        let mut element = niche(1).with_depth(15.0);
        element.computed_position = Some(Point::new(10.0, 20.0));
        assert_eq!(
            element.view_bounds(ViewType::Plan, 10.0),
            BoundingBox::new(10.0, 20.0, 40.0, 15.0)
        );
        element.depth = None;
        assert_eq!(element.view_bounds(ViewType::Plan, 10.0).height, 10.0);
        assert_eq!(element.view_bounds(ViewType::Elevation, 10.0).height, 40.0);
    }
}
