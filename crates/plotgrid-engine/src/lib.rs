//! Plot Grid Engine - the grid behind the scenes
//!
//! A spreadsheet-like plotting surface for a novel project: one row per
//! scene (plus free-floating custom rows), one column per plot thread,
//! and cards in the cells. The engine owns the grid-local state and
//! treats the document's scene tree as an external, read-mostly source of
//! truth:
//! - [`merge`] interleaves scene-backed rows with persisted custom rows
//! - [`PlotGrid`] exposes every mutation, validated before applied
//! - the sync bridge promotes custom rows into real scenes and prunes
//!   after external deletions
//! - [`projector`](crate::projector) folds everything into render-ready
//!   snapshots, ghost columns included
//! - [`view`] plugs the grid into the host's view-switching loop
//!
//! All operations are synchronous and atomic with respect to the
//! in-memory model; persistence is the host's job via
//! [`PlotGrid::to_parts`] / [`PlotGrid::from_parts`].

#![warn(unreachable_pub)]

pub mod bridge;
pub mod cards;
pub mod columns;
pub mod coordinator;
pub mod error;
pub mod grid;
pub mod merge;
pub mod projector;
pub mod rows;
pub mod view;

// Re-exports for convenience
pub use bridge::PruneReport;
pub use cards::CardStore;
pub use columns::ColumnRegistry;
pub use error::GridError;
pub use grid::{GridConfig, OrphanPolicy, PlotGrid};
pub use merge::{merge_rows, MergedKind, MergedRow};
pub use projector::{
    CellProjection, ColumnSlot, GridProjection, RowProjection, SidebarGroup, SidebarProjection,
    StructureCell, ViewContext,
};
pub use rows::RowTable;
pub use view::{PlotGridView, ViewExtension, ViewKind, ViewRegistry, ViewUpdate};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding the grid engine
    pub use crate::{
        GridConfig, GridError, GridProjection, MergedRow, OrphanPolicy, PlotGrid, ViewContext,
        ViewKind,
    };
    pub use plotgrid_model::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
