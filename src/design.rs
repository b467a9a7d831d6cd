//! Design state and the mutation API
//!
//! [`Design`] owns the canvas, the element tree and the editor state
//! (selection, active view, zoom). Every mutation re-resolves positions
//! before it returns, so readers never observe a partially resolved tree,
//! and then hands a [`DesignDocument`] snapshot to subscribed observers.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::config::DesignConfig;
use crate::error::DocumentError;
use crate::layout::{
    compute_gaps, dangling_references, edge_distances, resolve, zorder, DanglingReference,
    EdgeDistances, Element, ElementId, ElementKind, ElementPatch, ElementTree, Gap,
    LayoutConfig, Material, MaterialType, Point, Positioning, ViewType,
};
use crate::log::{debug, warn};
use crate::summary::AreaSummary;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;

/// The persisted form of a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    pub canvas: Canvas,
    #[serde(default)]
    pub elements: ElementTree,
    #[serde(default)]
    pub selected_element_id: Option<ElementId>,
    #[serde(default)]
    pub active_view: ViewType,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Id the next added element receives, so deleted ids stay retired
    #[serde(default)]
    pub next_id: u64,
}

fn default_zoom() -> f64 {
    1.0
}

/// Lowest id not used by any element nor named by any reference
fn fresh_id_floor(tree: &ElementTree) -> u64 {
    tree.iter()
        .flat_map(|el| {
            let reference = match &el.positioning {
                Positioning::Relative { reference_id, .. } => Some(reference_id.0),
                _ => None,
            };
            std::iter::once(el.id.0).chain(reference)
        })
        .max()
        .map_or(1, |id| id + 1)
}

impl DesignDocument {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    /// Parse and validate a document; cached positions are kept as-is
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let document: DesignDocument =
            serde_json::from_str(source).map_err(|err| DocumentError::malformed(err, source))?;
        if let Some(id) = document.elements.duplicate_id() {
            return Err(DocumentError::DuplicateId { id });
        }
        Ok(document)
    }
}

/// Receives a snapshot after every committed change
pub trait DesignObserver {
    fn design_changed(&mut self, snapshot: &DesignDocument);
}

impl<F: FnMut(&DesignDocument)> DesignObserver for F {
    fn design_changed(&mut self, snapshot: &DesignDocument) {
        self(snapshot)
    }
}

pub struct Design {
    canvas: Canvas,
    tree: ElementTree,
    selected: Option<ElementId>,
    view: ViewType,
    zoom: f64,
    next_id: u64,
    /// Suffix for default element names
    name_counter: u64,
    layout: LayoutConfig,
    observers: Vec<Box<dyn DesignObserver>>,
}

impl fmt::Debug for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Design")
            .field("canvas", &self.canvas)
            .field("tree", &self.tree)
            .field("selected", &self.selected)
            .field("view", &self.view)
            .field("zoom", &self.zoom)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}

impl Design {
    /// An empty design on the default canvas
    pub fn new() -> Self {
        Self::with_config(&DesignConfig::default())
    }

    pub fn with_config(config: &DesignConfig) -> Self {
        let mut canvas = config.canvas.clone();
        if let Some(name) = &config.name {
            canvas.name = name.clone();
        }
        Self {
            canvas,
            tree: ElementTree::new(),
            selected: None,
            view: ViewType::default(),
            zoom: default_zoom(),
            next_id: 1,
            name_counter: 1,
            layout: config.layout.clone(),
            observers: Vec::new(),
        }
    }

    /// Build a design from JSON text with the default layout settings
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let mut design = Self::new();
        design.load_json(source)?;
        Ok(design)
    }

    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), "saved design");
        Ok(())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.tree.find(id)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.tree.find(id))
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Register an observer, such as an autosave hook
    pub fn subscribe(&mut self, observer: impl DesignObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add a default element of `kind` and select it
    ///
    /// Returns `None`, changing nothing, when `parent` does not exist.
    pub fn add(&mut self, kind: ElementKind, parent: Option<ElementId>) -> Option<ElementId> {
        let id = ElementId(self.next_id);
        let defaults = self.layout.defaults_for(kind);
        let material = match kind {
            ElementKind::Shelf => MaterialType::Wood,
            _ => MaterialType::Drywall,
        };

        let mut element = Element::new(id, kind, defaults.size())
            .with_name(format!("{} {}", kind.display_name(), self.name_counter))
            .with_stack_key(zorder::next_stack_key(&self.tree));
        element.depth = defaults.depth;
        element.material = Material::new(material);

        if !self.tree.add_child(parent, element) {
            debug!(?parent, "add under unknown parent ignored");
            return None;
        }
        self.next_id += 1;
        self.name_counter += 1;
        self.selected = Some(id);
        self.commit();
        Some(id)
    }

    /// Merge `patch` into an element; unknown ids are ignored
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        if !self.tree.update(id, patch) {
            debug!(%id, "update of unknown element ignored");
            return false;
        }
        self.commit();
        true
    }

    /// Delete an element with its subtree
    pub fn delete(&mut self, id: ElementId) -> bool {
        let Some(removed) = self.tree.delete(id) else {
            debug!(%id, "delete of unknown element ignored");
            return false;
        };
        if let Some(selected) = self.selected {
            if ElementTree::from_roots(vec![removed]).contains(selected) {
                self.selected = None;
            }
        }
        self.commit();
        true
    }

    /// Pin an element at exact canvas coordinates
    ///
    /// No grid snapping happens here; see [`Canvas::snap`].
    pub fn move_to(&mut self, id: ElementId, position: Point) -> bool {
        let patch = ElementPatch::new().positioning(Positioning::absolute(position));
        self.update(id, &patch)
    }

    /// Replace the order of the root elements
    pub fn reorder_roots(&mut self, order: &[ElementId]) {
        self.tree.reorder_roots(order);
        self.commit();
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.commit();
    }

    pub fn set_canvas_width(&mut self, width: f64) {
        self.canvas.dimensions.width = width;
        self.commit();
    }

    pub fn set_canvas_height(&mut self, height: f64) {
        self.canvas.dimensions.height = height;
        self.commit();
    }

    pub fn set_canvas_depth(&mut self, depth: f64) {
        self.canvas.dimensions.depth = depth;
        self.commit();
    }

    /// Select an element, or clear the selection with `None`
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        if let Some(id) = id {
            if !self.tree.contains(id) {
                return false;
            }
        }
        self.selected = id;
        self.notify();
        true
    }

    pub fn set_view(&mut self, view: ViewType) {
        self.view = view;
        self.notify();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.notify();
    }

    /// Spacing annotations for the active view; empty unless the canvas shows distances
    pub fn gaps(&self) -> Vec<Gap> {
        if !self.canvas.show_all_distances {
            return Vec::new();
        }
        compute_gaps(&self.tree.flatten(), self.view, &self.layout)
    }

    /// Distances from an element to the canvas edges and its closest neighbors
    pub fn measure(&self, id: ElementId) -> Option<EdgeDistances> {
        let element = self.tree.find(id)?;
        Some(edge_distances(
            element,
            &self.tree.flatten(),
            self.canvas.extent(self.view),
            self.view,
            self.layout.fallback_depth,
        ))
    }

    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        dangling_references(&self.tree)
    }

    pub fn summary(&self) -> AreaSummary {
        AreaSummary::compute(self)
    }

    /// Elements bottom first
    pub fn paint_order(&self) -> Vec<&Element> {
        zorder::paint_order(&self.tree)
    }

    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        self.restack(id, zorder::bring_forward)
    }

    pub fn send_backward(&mut self, id: ElementId) -> bool {
        self.restack(id, zorder::send_backward)
    }

    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        self.restack(id, zorder::bring_to_front)
    }

    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        self.restack(id, zorder::send_to_back)
    }

    /// Keys are made dense before the change so neighbor swaps never hit ties
    fn restack(
        &mut self,
        id: ElementId,
        change: fn(&mut ElementTree, ElementId) -> bool,
    ) -> bool {
        if !self.tree.contains(id) {
            debug!(%id, "stacking change on unknown element ignored");
            return false;
        }
        zorder::normalize(&mut self.tree);
        let changed = change(&mut self.tree, id);
        zorder::normalize(&mut self.tree);
        self.commit();
        changed
    }

    pub fn to_document(&self) -> DesignDocument {
        DesignDocument {
            canvas: self.canvas.clone(),
            elements: self.tree.clone(),
            selected_element_id: self.selected,
            active_view: self.view,
            zoom: self.zoom,
            next_id: self.next_id,
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.to_document().to_json()
    }

    /// Replace the whole state from JSON text
    ///
    /// The text is fully parsed and validated first; on failure the design
    /// is left untouched.
    pub fn load_json(&mut self, source: &str) -> Result<(), DocumentError> {
        let document = DesignDocument::from_json(source)?;
        self.load_document(document);
        Ok(())
    }

    /// Replace the whole state from a document, re-resolving every position
    pub fn load_document(&mut self, document: DesignDocument) {
        let mut tree = document.elements;
        tree.relink_parents();

        self.next_id = fresh_id_floor(&tree).max(document.next_id);
        self.name_counter = tree.len() as u64 + 1;
        self.selected = document.selected_element_id.filter(|id| {
            let exists = tree.contains(*id);
            if !exists {
                warn!(%id, "loaded selection points at a missing element");
            }
            exists
        });
        self.canvas = document.canvas;
        self.view = document.active_view;
        self.zoom = document.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.tree = tree;
        debug!(elements = self.tree.len(), "loaded design");
        self.commit();
    }

    /// Re-resolve positions and notify observers
    fn commit(&mut self) {
        self.tree = resolve(&self.tree, self.canvas.dimensions.width);
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.to_document();
        for observer in &mut self.observers {
            observer.design_changed(&snapshot);
        }
    }
}
