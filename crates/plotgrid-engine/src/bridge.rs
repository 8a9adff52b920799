//! Scene-tree sync bridge
//!
//! Row lifecycle against the external tree: inserting custom rows
//! relative to the merged sequence, promoting a custom row into a real
//! scene, deleting custom rows, and reacting to external scene deletion.
//!
//! Neighbor-based keys are always computed from a merge run *inside* the
//! operation, never from a caller-supplied row list — two back-to-back
//! inserts around the same row therefore see each other.

use crate::error::GridError;
use crate::grid::{OrphanPolicy, PlotGrid};
use plotgrid_model::{
    allocate_between, RowId, RowRecord, SceneId, SceneTree, UNTITLED_ROW,
};
use std::collections::{HashMap, HashSet};

/// Title given to scenes created by promotion when the row still carries
/// its placeholder label.
const UNTITLED_SCENE: &str = "Untitled";

/// Outcome of [`PlotGrid::observe_tree`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Promoted records dropped because their scene is gone
    pub rows_removed: usize,
    /// Cards cascaded by the orphan policy
    pub cards_removed: usize,
}

impl PlotGrid {
    /// Insert a custom row immediately before `row` in the merged order
    ///
    /// # Errors
    /// `UnknownRow` if `row` is not in the merged sequence.
    pub fn insert_row_before(
        &mut self,
        tree: &dyn SceneTree,
        row: RowId,
    ) -> Result<RowId, GridError> {
        self.insert_row_at(tree, row, Side::Before)
    }

    /// Insert a custom row immediately after `row` in the merged order
    ///
    /// # Errors
    /// `UnknownRow` if `row` is not in the merged sequence.
    pub fn insert_row_after(
        &mut self,
        tree: &dyn SceneTree,
        row: RowId,
    ) -> Result<RowId, GridError> {
        self.insert_row_at(tree, row, Side::After)
    }

    fn insert_row_at(
        &mut self,
        tree: &dyn SceneTree,
        row: RowId,
        side: Side,
    ) -> Result<RowId, GridError> {
        let merged = self.merged_rows(tree);
        let index = merged
            .iter()
            .position(|r| r.id == row)
            .ok_or(GridError::UnknownRow(row))?;

        let (before, after) = match side {
            Side::Before => (
                index.checked_sub(1).map(|i| merged[i].order_key),
                Some(merged[index].order_key),
            ),
            Side::After => (
                Some(merged[index].order_key),
                merged.get(index + 1).map(|r| r.order_key),
            ),
        };

        let key = allocate_between(before, after);
        let id = self.rows.insert(RowRecord::new(key, UNTITLED_ROW));
        tracing::debug!(row = %id, key = %key, "inserted custom row");
        Ok(id)
    }

    /// Rename a custom row
    ///
    /// Structural rows take their title from the scene; rename those in
    /// the document editor.
    ///
    /// # Errors
    /// `UnknownRow`, `StructuralRowImmutable`.
    pub fn rename_row(
        &mut self,
        tree: &dyn SceneTree,
        row: RowId,
        title: impl Into<String>,
    ) -> Result<(), GridError> {
        self.require_custom(tree, row)?;
        let record = self.rows.get_mut(row).expect("checked custom above");
        record.title = title.into();
        Ok(())
    }

    /// Delete a custom row, cascading its cards; returns the card count
    ///
    /// Structural rows cannot be deleted here — delete the scene through
    /// the document tree and let [`PlotGrid::observe_tree`] react.
    ///
    /// # Errors
    /// `UnknownRow`, `StructuralRowImmutable`. Nothing is mutated on error.
    pub fn delete_row(&mut self, tree: &dyn SceneTree, row: RowId) -> Result<usize, GridError> {
        self.require_custom(tree, row)?;
        self.rows.remove(row);
        let cascaded = self.cards.remove_by_row(row);
        tracing::info!(row = %row, cascaded, "deleted custom row");
        Ok(cascaded)
    }

    /// Promote a custom row into a real scene
    ///
    /// Creates a scene in the chapter owning the nearest preceding
    /// structural row (falling back to the nearest following one), then
    /// binds the record to it. The row keeps its id, so attached cards
    /// stay attached. There is no reverse transition.
    ///
    /// # Errors
    /// `UnknownRow`, `StructuralRowImmutable`, `NoAdjacentChapter` when
    /// the merged sequence holds no structural anchor, and any scene-tree
    /// rejection. Nothing is mutated on error.
    pub fn convert_row_to_scene(
        &mut self,
        tree: &mut dyn SceneTree,
        row: RowId,
    ) -> Result<SceneId, GridError> {
        self.require_custom(&*tree, row)?;

        let merged = self.merged_rows(&*tree);
        let index = merged
            .iter()
            .position(|r| r.id == row)
            .ok_or(GridError::UnknownRow(row))?;

        let chapter = merged[..index]
            .iter()
            .rev()
            .find_map(crate::merge::MergedRow::chapter_id)
            .or_else(|| merged[index + 1..].iter().find_map(crate::merge::MergedRow::chapter_id))
            .ok_or(GridError::NoAdjacentChapter(row))?;

        let record = self.rows.get(row).expect("checked custom above");
        let title = if record.title.is_empty() || record.title == UNTITLED_ROW {
            UNTITLED_SCENE.to_string()
        } else {
            record.title.clone()
        };

        let scene = tree.create_scene_in_chapter(chapter, &title)?;
        self.rows
            .get_mut(row)
            .expect("checked custom above")
            .promote(scene);

        tracing::info!(row = %row, scene = %scene, chapter = %chapter, "promoted row to scene");
        Ok(scene)
    }

    /// React to external tree mutations
    ///
    /// Drops promoted records whose scene was deleted and applies the
    /// orphan policy to cards left on dead structural rows. Safe to call
    /// after every tree change; a no-op when nothing is orphaned.
    pub fn observe_tree(&mut self, tree: &dyn SceneTree) -> PruneReport {
        let live_scenes: HashSet<SceneId> =
            tree.scenes().iter().map(|s| s.scene_id).collect();

        let rows_removed = self.rows.prune_promoted(&live_scenes).len();

        let cards_removed = match self.config.orphan_policy {
            OrphanPolicy::Cascade => {
                let promoted: HashMap<SceneId, RowId> =
                    self.rows.promoted_scene_rows().collect();
                let mut live_rows: HashSet<RowId> =
                    self.rows.iter().map(|r| r.id).collect();
                for scene in &live_scenes {
                    live_rows.insert(
                        promoted
                            .get(scene)
                            .copied()
                            .unwrap_or_else(|| RowId::for_scene(*scene)),
                    );
                }
                self.cards.remove_orphaned(&live_rows)
            }
            OrphanPolicy::Keep => 0,
        };

        if rows_removed > 0 || cards_removed > 0 {
            tracing::info!(rows_removed, cards_removed, "pruned after tree change");
        }

        PruneReport {
            rows_removed,
            cards_removed,
        }
    }

    /// Reject anything that is not a live, unpromoted custom row
    fn require_custom(&self, tree: &dyn SceneTree, row: RowId) -> Result<(), GridError> {
        match self.rows.get(row) {
            Some(record) if !record.is_promoted() => Ok(()),
            Some(_) => Err(GridError::StructuralRowImmutable(row)),
            None => {
                // Derived structural rows have no record; tell them apart
                // from stale ids so the caller can report correctly.
                if self.merged_rows(tree).iter().any(|r| r.id == row) {
                    Err(GridError::StructuralRowImmutable(row))
                } else {
                    Err(GridError::UnknownRow(row))
                }
            }
        }
    }
}

enum Side {
    Before,
    After,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use plotgrid_model::Card;
    use plotgrid_test_utils::{single_scene_tree, two_chapter_tree, MemorySceneTree};

    #[test]
    fn insert_after_sole_row_lands_after() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let s1_row = RowId::for_scene(s1);

        let new_row = grid.insert_row_after(&tree, s1_row).unwrap();

        let ids: Vec<_> = grid.merged_rows(&tree).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![s1_row, new_row]);
    }

    #[test]
    fn insert_before_first_row_lands_first() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();

        let new_row = grid.insert_row_before(&tree, RowId::for_scene(s1)).unwrap();

        let ids: Vec<_> = grid.merged_rows(&tree).iter().map(|r| r.id).collect();
        assert_eq!(ids[0], new_row);
    }

    #[test]
    fn back_to_back_inserts_see_each_other() {
        // The stale-snapshot guard: the second insert merges again, so it
        // lands between the first insert and the next scene, not on top
        // of the first insert.
        let (tree, _, scenes) = two_chapter_tree();
        let mut grid = PlotGrid::default();
        let anchor = RowId::for_scene(scenes[0]);

        let first = grid.insert_row_after(&tree, anchor).unwrap();
        let second = grid.insert_row_after(&tree, anchor).unwrap();

        let ids: Vec<_> = grid.merged_rows(&tree).iter().map(|r| r.id).collect();
        assert_eq!(&ids[..3], &[anchor, second, first]);
    }

    #[test]
    fn insert_rejects_stale_row() {
        let (tree, _, _) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let err = grid.insert_row_after(&tree, RowId::new()).unwrap_err();
        assert!(matches!(err, GridError::UnknownRow(_)));
    }

    #[test]
    fn delete_structural_row_is_declined() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let err = grid.delete_row(&tree, RowId::for_scene(s1)).unwrap_err();
        assert!(matches!(err, GridError::StructuralRowImmutable(_)));
    }

    #[test]
    fn delete_custom_row_cascades_its_cards_only() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let col = grid.add_column("A");
        let doomed = grid.insert_row_after(&tree, RowId::for_scene(s1)).unwrap();
        grid.cards.insert(Card::new(doomed, col, "x", ""));
        grid.cards.insert(Card::new(doomed, col, "y", ""));
        let kept = grid.cards.insert(Card::new(RowId::for_scene(s1), col, "z", ""));

        assert_eq!(grid.delete_row(&tree, doomed).unwrap(), 2);
        assert_eq!(grid.cards().len(), 1);
        assert!(grid.cards().contains(kept));
    }

    #[test]
    fn promotion_appends_scene_and_keeps_cards() {
        let (mut tree, ch1, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let col = grid.add_column("A");
        let row = grid.insert_row_after(&tree, RowId::for_scene(s1)).unwrap();
        let card = grid.cards.insert(Card::new(row, col, "beat", ""));

        let scene = grid.convert_row_to_scene(&mut tree, row).unwrap();

        assert_eq!(tree.scenes_in_chapter(ch1), vec![s1, scene]);
        let merged = grid.merged_rows(&tree);
        assert_eq!(merged.len(), 2);
        assert!(merged[1].is_structural());
        assert_eq!(merged[1].id, row);
        assert_eq!(grid.cards().by_row(row).next().unwrap().id, card);
    }

    #[test]
    fn promotion_prefers_preceding_chapter() {
        let (mut tree, chapters, scenes) = two_chapter_tree();
        let mut grid = PlotGrid::default();
        // After S2, the last scene of Ch1.
        let row = grid
            .insert_row_after(&tree, RowId::for_scene(scenes[1]))
            .unwrap();

        let scene = grid.convert_row_to_scene(&mut tree, row).unwrap();
        assert!(tree.scenes_in_chapter(chapters[0]).contains(&scene));
    }

    #[test]
    fn promotion_falls_back_to_following_chapter() {
        let (mut tree, chapters, scenes) = two_chapter_tree();
        let mut grid = PlotGrid::default();
        let row = grid
            .insert_row_before(&tree, RowId::for_scene(scenes[0]))
            .unwrap();

        let scene = grid.convert_row_to_scene(&mut tree, row).unwrap();
        assert!(tree.scenes_in_chapter(chapters[0]).contains(&scene));
    }

    #[test]
    fn promotion_without_anchor_is_declined() {
        let mut tree = MemorySceneTree::new();
        let mut grid = PlotGrid::default();
        // A lone custom row in an empty project: no structural anchor.
        let row = grid.rows.insert(RowRecord::new(
            plotgrid_model::OrderKey::zero(),
            UNTITLED_ROW,
        ));

        let err = grid.convert_row_to_scene(&mut tree, row).unwrap_err();
        assert!(matches!(err, GridError::NoAdjacentChapter(_)));
        assert!(!grid.rows().get(row).unwrap().is_promoted());
    }

    #[test]
    fn promotion_of_promoted_row_is_declined() {
        let (mut tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = grid.insert_row_after(&tree, RowId::for_scene(s1)).unwrap();
        grid.convert_row_to_scene(&mut tree, row).unwrap();

        let err = grid.convert_row_to_scene(&mut tree, row).unwrap_err();
        assert!(matches!(err, GridError::StructuralRowImmutable(_)));
    }

    #[test]
    fn renamed_row_titles_the_new_scene() {
        let (mut tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = grid.insert_row_after(&tree, RowId::for_scene(s1)).unwrap();
        grid.rename_row(&tree, row, "The ambush").unwrap();

        let scene = grid.convert_row_to_scene(&mut tree, row).unwrap();
        assert_eq!(tree.scene(scene).unwrap().title, "The ambush");
    }

    #[test]
    fn observe_tree_cascades_orphaned_cards() {
        let (mut tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let col = grid.add_column("A");
        let s1_row = RowId::for_scene(s1);
        grid.cards.insert(Card::new(s1_row, col, "x", ""));
        let custom = grid.insert_row_after(&tree, s1_row).unwrap();
        let kept = grid.cards.insert(Card::new(custom, col, "y", ""));

        tree.remove_scene(s1);
        let report = grid.observe_tree(&tree);

        assert_eq!(report.cards_removed, 1);
        assert_eq!(grid.cards().len(), 1);
        assert!(grid.cards().contains(kept));
    }

    #[test]
    fn observe_tree_prunes_promoted_records() {
        let (mut tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = grid.insert_row_after(&tree, RowId::for_scene(s1)).unwrap();
        let scene = grid.convert_row_to_scene(&mut tree, row).unwrap();

        tree.remove_scene(scene);
        let report = grid.observe_tree(&tree);

        assert_eq!(report.rows_removed, 1);
        assert!(grid.rows().get(row).is_none());
    }

    #[test]
    fn keep_policy_retains_orphans() {
        let (mut tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::new(
            GridConfig::new().with_orphan_policy(OrphanPolicy::Keep),
        );
        let col = grid.add_column("A");
        grid.cards.insert(Card::new(RowId::for_scene(s1), col, "x", ""));

        tree.remove_scene(s1);
        let report = grid.observe_tree(&tree);

        assert_eq!(report.cards_removed, 0);
        assert_eq!(grid.cards().len(), 1);
    }
}
