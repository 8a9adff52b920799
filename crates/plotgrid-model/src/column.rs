//! Grid columns
//!
//! Exactly one `Structure` column exists per grid, is always first, and
//! mirrors the scene tree. `Thread` columns are user-created plot lines,
//! freely renamable, reorderable, and deletable.

use crate::id::ColumnId;
use serde::{Deserialize, Serialize};

/// Column role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// The fixed first column mirroring scenes; exactly one per grid,
    /// non-editable and non-deletable for the lifetime of a project.
    Structure,

    /// A user-defined plot-thread column.
    Thread,
}

/// A grid column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier
    pub id: ColumnId,
    /// Column role
    pub kind: ColumnKind,
    /// User-editable label; empty for the structure column
    pub title: String,
}

/// Placeholder label for freshly materialized thread columns
pub const UNTITLED_THREAD: &str = "Untitled thread";

impl Column {
    /// Create the fixed structure column
    #[inline]
    #[must_use]
    pub fn structure() -> Self {
        Self {
            id: ColumnId::new(),
            kind: ColumnKind::Structure,
            title: String::new(),
        }
    }

    /// Create a user thread column
    #[inline]
    #[must_use]
    pub fn thread(title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            kind: ColumnKind::Thread,
            title: title.into(),
        }
    }

    /// Whether this is the fixed structure column
    #[inline]
    #[must_use]
    pub fn is_structure(&self) -> bool {
        self.kind == ColumnKind::Structure
    }
}
