//! Row merge engine
//!
//! Produces the single ordered row sequence shown to the user by
//! interleaving two sources:
//! - **structural rows**, one per scene, whose keys are derived from
//!   traversal position (`position × stride`) on every pass and never
//!   stored;
//! - **custom rows**, whose keys were allocated at insertion time and
//!   persist independently of tree changes.
//!
//! The merge is a pure function of the tree snapshot and the row table:
//! re-running it without intervening mutation reproduces the same order.
//! On key ties the structural row wins (tree position is the
//! tie-breaker); ties between custom rows keep table insertion order
//! because the sort is stable.

use crate::rows::RowTable;
use plotgrid_model::{ChapterId, OrderKey, RowId, SceneId, SceneSummary, SceneTree};
use std::collections::HashMap;

/// What a merged row is backed by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedKind {
    /// Mirrors a live scene; display attributes are read-through
    Structural {
        /// Live scene summary from the tree
        scene: SceneSummary,
        /// Set on the first scene of each chapter, for grouping display
        first_in_chapter: bool,
    },

    /// Free-standing user row with no backing scene
    Custom {
        /// User-editable label
        title: String,
    },
}

/// One row of the merged sequence
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    /// Stable row identity (kept across promotion)
    pub id: RowId,
    /// Effective sort key for this pass
    pub order_key: OrderKey,
    /// Backing kind
    pub kind: MergedKind,
}

impl MergedRow {
    /// Whether the row mirrors a scene
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, MergedKind::Structural { .. })
    }

    /// Whether the row is free-standing
    #[inline]
    #[must_use]
    pub fn is_custom(&self) -> bool {
        !self.is_structural()
    }

    /// Backing scene, if structural
    #[inline]
    #[must_use]
    pub fn scene_id(&self) -> Option<SceneId> {
        match &self.kind {
            MergedKind::Structural { scene, .. } => Some(scene.scene_id),
            MergedKind::Custom { .. } => None,
        }
    }

    /// Owning chapter, if structural
    #[inline]
    #[must_use]
    pub fn chapter_id(&self) -> Option<ChapterId> {
        match &self.kind {
            MergedKind::Structural { scene, .. } => Some(scene.chapter_id),
            MergedKind::Custom { .. } => None,
        }
    }

    /// Display title (live scene title or the custom label)
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.kind {
            MergedKind::Structural { scene, .. } => &scene.title,
            MergedKind::Custom { title } => title,
        }
    }
}

/// Merge the live tree with the persisted row table into display order
#[must_use]
pub fn merge_rows(tree: &dyn SceneTree, rows: &RowTable) -> Vec<MergedRow> {
    let scenes = tree.scenes();
    let promoted: HashMap<SceneId, RowId> = rows.promoted_scene_rows().collect();

    let mut merged = Vec::with_capacity(scenes.len() + rows.len());
    let mut prev_chapter: Option<ChapterId> = None;

    for (position, scene) in scenes.into_iter().enumerate() {
        let first_in_chapter = prev_chapter != Some(scene.chapter_id);
        prev_chapter = Some(scene.chapter_id);

        let id = promoted
            .get(&scene.scene_id)
            .copied()
            .unwrap_or_else(|| RowId::for_scene(scene.scene_id));

        merged.push(MergedRow {
            id,
            order_key: OrderKey::from_position(position),
            kind: MergedKind::Structural {
                scene,
                first_in_chapter,
            },
        });
    }

    for record in rows.iter().filter(|r| !r.is_promoted()) {
        merged.push(MergedRow {
            id: record.id,
            order_key: record.order_key,
            kind: MergedKind::Custom {
                title: record.title.clone(),
            },
        });
    }

    // Stable sort: structural rows precede customs on equal keys.
    merged.sort_by(|a, b| {
        a.order_key
            .cmp(&b.order_key)
            .then_with(|| a.is_custom().cmp(&b.is_custom()))
    });

    merged
}
