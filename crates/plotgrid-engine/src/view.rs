//! View extension registry
//!
//! The host workbench shows one view at a time (editor, structure
//! outline, plot board, plot grid) and asks the registry to refresh the
//! active one whenever the tree or a selection changes. The grid plugs
//! in as one extension among peers; views the engine does not render
//! report [`ViewUpdate::External`] and the host refreshes them itself.

use crate::grid::PlotGrid;
use crate::projector::{GridProjection, ViewContext};
use plotgrid_model::SceneTree;
use std::cell::RefCell;
use std::rc::Rc;

/// The workbench views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Prose editor
    #[default]
    Editor,
    /// Act/chapter/scene outline
    Structure,
    /// Freeform plot board
    Plot,
    /// The plot grid
    PlotGrid,
}

/// What a refresh produced
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// A fresh grid snapshot to render
    Grid(GridProjection),
    /// The view renders outside the engine; nothing to hand back
    External,
}

/// A view that can be refreshed against the live tree
pub trait ViewExtension {
    /// Which view this extension renders
    fn kind(&self) -> ViewKind;

    /// Recompute the view's state for the given context
    fn refresh(&self, tree: &dyn SceneTree, ctx: &ViewContext) -> ViewUpdate;
}

/// Registry of view extensions, one per [`ViewKind`]
#[derive(Default)]
pub struct ViewRegistry {
    extensions: Vec<Box<dyn ViewExtension>>,
}

impl ViewRegistry {
    /// Create empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension, replacing any previous one of the same kind
    pub fn register(&mut self, extension: Box<dyn ViewExtension>) {
        let kind = extension.kind();
        self.extensions.retain(|e| e.kind() != kind);
        self.extensions.push(extension);
        tracing::debug!(?kind, "registered view extension");
    }

    /// Whether a view kind has an extension
    #[must_use]
    pub fn contains(&self, kind: ViewKind) -> bool {
        self.extensions.iter().any(|e| e.kind() == kind)
    }

    /// Registered kinds, in registration order
    #[must_use]
    pub fn kinds(&self) -> Vec<ViewKind> {
        self.extensions.iter().map(|e| e.kind()).collect()
    }

    /// Refresh the extension for `ctx.view`, if registered
    pub fn refresh(&self, tree: &dyn SceneTree, ctx: &ViewContext) -> Option<ViewUpdate> {
        self.extensions
            .iter()
            .find(|e| e.kind() == ctx.view)
            .map(|e| e.refresh(tree, ctx))
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Grid-backed extension for [`ViewKind::PlotGrid`]
///
/// Shares the engine with the host through `Rc<RefCell<_>>`: the host
/// mutates the grid on user actions, the registry reads it on refresh.
#[derive(Debug, Clone)]
pub struct PlotGridView {
    grid: Rc<RefCell<PlotGrid>>,
}

impl PlotGridView {
    /// Wrap a shared grid
    #[must_use]
    pub fn new(grid: Rc<RefCell<PlotGrid>>) -> Self {
        Self { grid }
    }
}

impl ViewExtension for PlotGridView {
    fn kind(&self) -> ViewKind {
        ViewKind::PlotGrid
    }

    fn refresh(&self, tree: &dyn SceneTree, ctx: &ViewContext) -> ViewUpdate {
        ViewUpdate::Grid(self.grid.borrow().project(tree, ctx))
    }
}
