//! Column registry
//!
//! Holds the ordered column list: the fixed structure column (exactly one,
//! always index 0, immutable) followed by user thread columns. Ghost
//! columns are a projection concept and never appear here; they become
//! real thread columns through [`ColumnRegistry::ensure_thread_at`].

use crate::error::GridError;
use indexmap::IndexMap;
use plotgrid_model::{Column, ColumnId, ColumnKind, UNTITLED_THREAD};
use serde::{Deserialize, Serialize};

/// Ordered registry of grid columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRegistry {
    columns: IndexMap<ColumnId, Column>,
}

impl ColumnRegistry {
    /// Create a registry holding only the structure column
    #[must_use]
    pub fn new() -> Self {
        let structure = Column::structure();
        let mut columns = IndexMap::new();
        columns.insert(structure.id, structure);
        Self { columns }
    }

    /// Rebuild a registry from a persisted column list
    ///
    /// The structure column is moved to index 0 if it drifted, and created
    /// if the snapshot predates it. Extra structure columns are dropped.
    #[must_use]
    pub fn from_columns(persisted: Vec<Column>) -> Self {
        let mut columns = IndexMap::with_capacity(persisted.len() + 1);
        let mut structure = None;
        let mut threads = Vec::new();
        for col in persisted {
            match col.kind {
                ColumnKind::Structure if structure.is_none() => structure = Some(col),
                ColumnKind::Structure => {}
                ColumnKind::Thread => threads.push(col),
            }
        }
        let structure = structure.unwrap_or_else(Column::structure);
        columns.insert(structure.id, structure);
        for col in threads {
            columns.insert(col.id, col);
        }
        Self { columns }
    }

    /// Identity of the fixed structure column
    ///
    /// # Panics
    /// Never: construction guarantees the structure column exists.
    #[inline]
    #[must_use]
    pub fn structure_id(&self) -> ColumnId {
        *self.columns.get_index(0).expect("structure column exists").0
    }

    /// Number of real columns (structure included)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false: the structure column is permanent
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(&id)
    }

    /// Whether `id` names a registered column
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ColumnId) -> bool {
        self.columns.contains_key(&id)
    }

    /// Column at display index (0 = structure)
    #[inline]
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Column> {
        self.columns.get_index(index).map(|(_, c)| c)
    }

    /// Display index of a column
    #[inline]
    #[must_use]
    pub fn index_of(&self, id: ColumnId) -> Option<usize> {
        self.columns.get_index_of(&id)
    }

    /// Columns in display order
    pub fn ordered(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Thread columns in display order
    pub fn threads(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|c| !c.is_structure())
    }

    /// Snapshot of the column list, for persistence
    #[must_use]
    pub fn to_columns(&self) -> Vec<Column> {
        self.columns.values().cloned().collect()
    }

    /// Append a new thread column
    pub fn add_thread(&mut self, title: impl Into<String>) -> ColumnId {
        let col = Column::thread(title);
        let id = col.id;
        self.columns.insert(id, col);
        id
    }

    /// Rename a thread column
    ///
    /// # Errors
    /// `UnknownColumn` for stale ids, `StructureColumnImmutable` for the
    /// structure column.
    pub fn rename(&mut self, id: ColumnId, title: impl Into<String>) -> Result<(), GridError> {
        let col = self.columns.get_mut(&id).ok_or(GridError::UnknownColumn(id))?;
        if col.is_structure() {
            return Err(GridError::StructureColumnImmutable);
        }
        col.title = title.into();
        Ok(())
    }

    /// Remove a thread column, preserving the order of the rest
    ///
    /// Card cascade is the caller's responsibility (the registry does not
    /// know about cards).
    ///
    /// # Errors
    /// `UnknownColumn` for stale ids, `StructureColumnImmutable` for the
    /// structure column.
    pub fn remove(&mut self, id: ColumnId) -> Result<Column, GridError> {
        match self.columns.get(&id) {
            None => Err(GridError::UnknownColumn(id)),
            Some(col) if col.is_structure() => Err(GridError::StructureColumnImmutable),
            Some(_) => Ok(self.columns.shift_remove(&id).expect("checked above")),
        }
    }

    /// Move a thread column to display index `to_index` (clamped to the
    /// thread range; index 0 stays the structure column)
    ///
    /// # Errors
    /// `UnknownColumn` for stale ids, `StructureColumnImmutable` for the
    /// structure column.
    pub fn move_thread(&mut self, id: ColumnId, to_index: usize) -> Result<(), GridError> {
        let from = self.index_of(id).ok_or(GridError::UnknownColumn(id))?;
        if from == 0 {
            return Err(GridError::StructureColumnImmutable);
        }
        let to = to_index.clamp(1, self.columns.len() - 1);
        self.columns.move_index(from, to);
        Ok(())
    }

    /// Materialize thread columns so display index `index` names a real
    /// column, and return its id
    ///
    /// Touching the first ghost slot creates exactly one column; deeper
    /// ghost slots also materialize the untitled columns in between, so
    /// the returned column sits at the requested index and a repeated call
    /// with the same index reuses it.
    ///
    /// # Errors
    /// `StructureColumnImmutable` for index 0.
    pub fn ensure_thread_at(&mut self, index: usize) -> Result<ColumnId, GridError> {
        if index == 0 {
            return Err(GridError::StructureColumnImmutable);
        }
        while self.columns.len() <= index {
            self.add_thread(UNTITLED_THREAD);
        }
        Ok(self.by_index(index).expect("materialized above").id)
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::new()
    }
}
