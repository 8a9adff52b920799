//! Plot Grid Model - entity types and ordering primitives
//!
//! The foundation crate for the plot grid engine:
//! - ULID-backed identifier newtypes for every entity namespace
//! - Fractional [`OrderKey`]s and the midpoint allocator
//! - Persisted entity types: columns, custom-row records, cards
//! - The [`SceneTree`] contract with the external document tree
//!
//! Everything persisted derives `serde` so the surrounding
//! project-persistence subsystem can reconstruct the grid from the column
//! list, the custom-row list, the card list, and the live scene tree.

#![warn(unreachable_pub)]

pub mod card;
pub mod column;
pub mod id;
pub mod order;
pub mod row;
pub mod scene;

// Re-exports for convenience
pub use card::{Card, UNTITLED_CARD};
pub use column::{Column, ColumnKind, UNTITLED_THREAD};
pub use id::{ActId, CardId, ChapterId, ColumnId, RowId, SceneId};
pub use order::{allocate_between, OrderKey, ORDER_STRIDE};
pub use row::{RowRecord, UNTITLED_ROW};
pub use scene::{SceneSummary, SceneTree, SceneTreeError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the plot grid model
    pub use crate::{
        allocate_between, Card, CardId, Column, ColumnId, ColumnKind, OrderKey, RowId, RowRecord,
        SceneId, SceneSummary, SceneTree,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
