//! Plot grid engine facade
//!
//! [`PlotGrid`] owns all grid-local state — the column registry, the
//! custom-row table, and the card store — and exposes every engine
//! operation. The scene tree stays outside: read-mostly, passed into each
//! operation that needs narrative order, and mutated only through row
//! promotion (see `bridge`).
//!
//! Every operation runs synchronously on the caller's thread, validates
//! before mutating, and is atomic with respect to the in-memory model.

use crate::cards::CardStore;
use crate::columns::ColumnRegistry;
use crate::error::GridError;
use crate::merge::{self, MergedRow};
use crate::rows::RowTable;
use plotgrid_model::{Card, CardId, Column, ColumnId, RowId, RowRecord, SceneTree};
use serde::{Deserialize, Serialize};

/// Policy for cards left on a structural row whose scene was deleted
/// externally
///
/// `Cascade` matches what deleting a custom row does and is the default.
/// `Keep` retains the orphans so a host can run its own migration flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Delete orphaned cards, matching custom-row deletion (default)
    #[default]
    Cascade,

    /// Keep orphaned cards in the store; they stop projecting until the
    /// host reassigns them
    Keep,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Minimum total column count offered by the projection
    pub ghost_min_columns: usize,
    /// Ghost columns appended past the last real column
    pub ghost_extra_columns: usize,
    /// What happens to cards orphaned by external scene deletion
    pub orphan_policy: OrphanPolicy,
}

impl GridConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With ghost padding bounds
    #[inline]
    #[must_use]
    pub fn with_ghost_padding(mut self, min_columns: usize, extra_columns: usize) -> Self {
        self.ghost_min_columns = min_columns;
        self.ghost_extra_columns = extra_columns;
        self
    }

    /// With orphan policy
    #[inline]
    #[must_use]
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            ghost_min_columns: 10,
            ghost_extra_columns: 5,
            orphan_policy: OrphanPolicy::Cascade,
        }
    }
}

/// The plot grid engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotGrid {
    pub(crate) config: GridConfig,
    pub(crate) columns: ColumnRegistry,
    pub(crate) rows: RowTable,
    pub(crate) cards: CardStore,
}

impl PlotGrid {
    /// Create an empty grid (structure column only)
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            columns: ColumnRegistry::new(),
            rows: RowTable::new(),
            cards: CardStore::new(),
        }
    }

    /// Rebuild the engine from persisted parts
    ///
    /// Structural rows are intentionally absent from the parts; they are
    /// derived from the live tree on the next merge.
    #[must_use]
    pub fn from_parts(
        config: GridConfig,
        columns: Vec<Column>,
        rows: Vec<RowRecord>,
        cards: Vec<Card>,
    ) -> Self {
        Self {
            config,
            columns: ColumnRegistry::from_columns(columns),
            rows: RowTable::from_records(rows),
            cards: CardStore::from_cards(cards),
        }
    }

    /// Snapshot of the persisted parts: `(columns, rows, cards)`
    #[must_use]
    pub fn to_parts(&self) -> (Vec<Column>, Vec<RowRecord>, Vec<Card>) {
        (
            self.columns.to_columns(),
            self.rows.to_records(),
            self.cards.to_cards(),
        )
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Column registry (read-only; mutate through engine operations)
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    /// Card store (read-only; mutate through engine operations)
    #[inline]
    #[must_use]
    pub fn cards(&self) -> &CardStore {
        &self.cards
    }

    /// Custom-row table (read-only; mutate through engine operations)
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &RowTable {
        &self.rows
    }

    /// The current merged row sequence against the live tree
    #[must_use]
    pub fn merged_rows(&self, tree: &dyn SceneTree) -> Vec<MergedRow> {
        merge::merge_rows(tree, &self.rows)
    }

    // --- Column operations ---

    /// Add a thread column after the existing columns
    pub fn add_column(&mut self, title: impl Into<String>) -> ColumnId {
        let id = self.columns.add_thread(title);
        tracing::debug!(column = %id, "added thread column");
        id
    }

    /// Rename a thread column
    ///
    /// # Errors
    /// `UnknownColumn`, `StructureColumnImmutable`.
    pub fn rename_column(
        &mut self,
        id: ColumnId,
        title: impl Into<String>,
    ) -> Result<(), GridError> {
        self.columns.rename(id, title)
    }

    /// Move a thread column to another display index
    ///
    /// # Errors
    /// `UnknownColumn`, `StructureColumnImmutable`.
    pub fn move_column(&mut self, id: ColumnId, to_index: usize) -> Result<(), GridError> {
        self.columns.move_thread(id, to_index)
    }

    /// Delete a thread column, cascading its cards
    ///
    /// # Errors
    /// `UnknownColumn`, `StructureColumnImmutable`. Nothing is mutated on
    /// error.
    pub fn delete_column(&mut self, id: ColumnId) -> Result<(), GridError> {
        self.columns.remove(id)?;
        let cascaded = self.cards.remove_by_column(id);
        tracing::info!(column = %id, cascaded, "deleted thread column");
        Ok(())
    }

    // --- Card operations ---

    /// Update a card's title and content
    ///
    /// # Errors
    /// `UnknownCard`.
    pub fn update_card(
        &mut self,
        id: CardId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), GridError> {
        self.cards.update_text(id, title, content)
    }

    /// Delete a single card
    ///
    /// # Errors
    /// `UnknownCard`.
    pub fn delete_card(&mut self, id: CardId) -> Result<(), GridError> {
        self.cards.remove(id)?;
        tracing::debug!(card = %id, "deleted card");
        Ok(())
    }

    /// Strip every card from a row without touching the row itself
    ///
    /// Used for structural rows, which the grid cannot delete; returns the
    /// number of cards removed.
    pub fn clear_row_cards(&mut self, row: RowId) -> usize {
        let cleared = self.cards.remove_by_row(row);
        if cleared > 0 {
            tracing::debug!(row = %row, cleared, "cleared row cards");
        }
        cleared
    }
}

impl Default for PlotGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
