//! Custom-row table
//!
//! Persisted row records: unpromoted custom rows plus promoted records
//! that bind a kept [`RowId`] to its backing scene. Structural rows for
//! scenes that were never promoted have no record here; the merge engine
//! derives them from the tree on every pass.

use indexmap::IndexMap;
use plotgrid_model::{RowId, RowRecord, SceneId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Table of persisted row records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowTable {
    records: IndexMap<RowId, RowRecord>,
}

impl RowTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from a persisted record list
    #[must_use]
    pub fn from_records(persisted: Vec<RowRecord>) -> Self {
        Self {
            records: persisted.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Number of records (promoted included)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&RowRecord> {
        self.records.get(&id)
    }

    /// Mutable lookup
    #[inline]
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut RowRecord> {
        self.records.get_mut(&id)
    }

    /// All records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &RowRecord> {
        self.records.values()
    }

    /// Snapshot of the record list, for persistence
    #[must_use]
    pub fn to_records(&self) -> Vec<RowRecord> {
        self.records.values().cloned().collect()
    }

    /// Promoted bindings: backing scene → kept row id
    pub fn promoted_scene_rows(&self) -> impl Iterator<Item = (SceneId, RowId)> + '_ {
        self.records
            .values()
            .filter_map(|r| r.promoted.map(|scene| (scene, r.id)))
    }

    /// Insert a record, returning its id
    pub fn insert(&mut self, record: RowRecord) -> RowId {
        let id = record.id;
        self.records.insert(id, record);
        id
    }

    /// Remove a record, preserving the order of the rest
    pub fn remove(&mut self, id: RowId) -> Option<RowRecord> {
        self.records.shift_remove(&id)
    }

    /// Drop promoted records whose backing scene is no longer live,
    /// returning the removed row ids
    pub fn prune_promoted(&mut self, live_scenes: &HashSet<SceneId>) -> Vec<RowId> {
        let dead: Vec<RowId> = self
            .records
            .values()
            .filter(|r| matches!(r.promoted, Some(s) if !live_scenes.contains(&s)))
            .map(|r| r.id)
            .collect();
        for id in &dead {
            self.records.shift_remove(id);
        }
        dead
    }
}
