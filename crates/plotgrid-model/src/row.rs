//! Persisted row records
//!
//! Only user-created rows are stored. Structural rows (one per scene) are
//! derived from the live tree at merge time and never persisted; see
//! [`crate::id::RowId::for_scene`] for how their identity is derived.
//!
//! A record whose `promoted` field is set was converted into a real scene:
//! it keeps its original id so attached cards stay valid, and from then on
//! its order and display attributes come from the tree, not from the
//! stored `order_key`/`title`. There is no reverse transition.

use crate::id::{RowId, SceneId};
use crate::order::OrderKey;
use serde::{Deserialize, Serialize};

/// Default title for freshly inserted custom rows
pub const UNTITLED_ROW: &str = "Untitled row";

/// A persisted custom-row record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Stable identifier, preserved across promotion
    pub id: RowId,
    /// Fractional position among merged rows (inert once promoted)
    pub order_key: OrderKey,
    /// User-editable label (inert once promoted)
    pub title: String,
    /// Backing scene once the row has been promoted
    pub promoted: Option<SceneId>,
}

impl RowRecord {
    /// Create a new custom row at the given key
    #[inline]
    #[must_use]
    pub fn new(order_key: OrderKey, title: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            order_key,
            title: title.into(),
            promoted: None,
        }
    }

    /// Whether the row has been promoted to a scene
    #[inline]
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        self.promoted.is_some()
    }

    /// Mark the record as promoted, binding it to `scene`
    #[inline]
    pub fn promote(&mut self, scene: SceneId) {
        self.promoted = Some(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_unpromoted() {
        let row = RowRecord::new(OrderKey::zero(), UNTITLED_ROW);
        assert!(!row.is_promoted());
        assert_eq!(row.title, UNTITLED_ROW);
    }

    #[test]
    fn promotion_keeps_id() {
        let mut row = RowRecord::new(OrderKey::new(5.0), "beat");
        let id = row.id;
        row.promote(SceneId::new());
        assert!(row.is_promoted());
        assert_eq!(row.id, id);
    }

    #[test]
    fn record_serde_round_trip() {
        let mut row = RowRecord::new(OrderKey::new(-10.0), "opening");
        row.promote(SceneId::new());
        let json = serde_json::to_string(&row).unwrap();
        let back: RowRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
