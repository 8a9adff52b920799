//! Error types for the grid engine
//!
//! Two families, per the engine's error policy:
//! - **Invalid reference**: an operation names an entity that no longer
//!   exists (stale id). The operation is rejected before any mutation;
//!   the caller re-renders from the latest projection.
//! - **Illegal transition**: the operation is recognized but not allowed
//!   (deleting a structural row, editing the structure column, promoting
//!   a row with no chapter anchor). Rejected before mutation and surfaced
//!   so the UI can inform the user.
//!
//! Every operation is synchronous and atomic with respect to the
//! in-memory model, so no error cascades.

use plotgrid_model::{CardId, ColumnId, RowId, SceneId, SceneTreeError};

/// Main grid engine error type
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Row id does not name a merged row
    #[error("unknown row: {0}")]
    UnknownRow(RowId),

    /// Column id does not name a registered column
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// Card id does not name a stored card
    #[error("unknown card: {0}")]
    UnknownCard(CardId),

    /// Scene id does not name a live scene
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),

    /// Structural rows are managed by the scene tree; they cannot be
    /// deleted, renamed, or promoted through the grid
    #[error("row {0} is structural; edit or delete the scene in the document tree")]
    StructuralRowImmutable(RowId),

    /// The structure column is fixed: not renamable, movable, deletable,
    /// or a valid card target
    #[error("the structure column cannot be modified or hold cards")]
    StructureColumnImmutable,

    /// Promotion found no structural row before or after the custom row,
    /// so no chapter can anchor the new scene
    #[error("row {0} has no adjacent chapter to anchor a new scene")]
    NoAdjacentChapter(RowId),

    /// The scene tree declined a request
    #[error("scene tree error: {0}")]
    SceneTree(#[from] SceneTreeError),
}

impl GridError {
    /// Whether this is a stale-id rejection (caller should re-render)
    #[inline]
    #[must_use]
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Self::UnknownRow(_)
                | Self::UnknownColumn(_)
                | Self::UnknownCard(_)
                | Self::UnknownScene(_)
        )
    }

    /// Whether this is a declined operation (caller should inform the user)
    #[inline]
    #[must_use]
    pub fn is_declined(&self) -> bool {
        matches!(
            self,
            Self::StructuralRowImmutable(_)
                | Self::StructureColumnImmutable
                | Self::NoAdjacentChapter(_)
        )
    }
}
