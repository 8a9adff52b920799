//! Drag coordinator
//!
//! Card placement by display index, the shape drag-and-drop hosts speak:
//! "this row, that column slot". Dropping on a ghost slot materializes the
//! backing thread column (and any untitled columns between it and the last
//! real one) before the card lands, so the card always ends up in a real
//! cell.
//!
//! Validation runs before materialization: a stale row or card id rejects
//! the whole operation without creating columns.

use crate::error::GridError;
use crate::grid::PlotGrid;
use plotgrid_model::{Card, CardId, RowId, SceneTree, UNTITLED_CARD};

impl PlotGrid {
    /// Create an untitled card at `(row, column index)`
    ///
    /// `row` may be structural or custom; `col_index` counts from the
    /// structure column at 0 and may point into the ghost range.
    ///
    /// # Errors
    /// `UnknownRow` for a stale row, `StructureColumnImmutable` for index
    /// 0. Nothing is mutated on error.
    pub fn add_card_at(
        &mut self,
        tree: &dyn SceneTree,
        row: RowId,
        col_index: usize,
    ) -> Result<CardId, GridError> {
        if col_index == 0 {
            return Err(GridError::StructureColumnImmutable);
        }
        self.require_merged_row(tree, row)?;

        let col = self.columns.ensure_thread_at(col_index)?;
        let id = self.cards.insert(Card::new(row, col, UNTITLED_CARD, ""));
        tracing::debug!(card = %id, row = %row, col_index, "added card");
        Ok(id)
    }

    /// Move an existing card to `(row, column index)`
    ///
    /// Same ghost semantics as [`PlotGrid::add_card_at`]; the card's title
    /// and content travel with it.
    ///
    /// # Errors
    /// `UnknownCard`, `UnknownRow`, `StructureColumnImmutable`. Nothing is
    /// mutated on error — a stale card never leaves materialized columns
    /// behind.
    pub fn update_card_position(
        &mut self,
        tree: &dyn SceneTree,
        card: CardId,
        row: RowId,
        col_index: usize,
    ) -> Result<(), GridError> {
        if col_index == 0 {
            return Err(GridError::StructureColumnImmutable);
        }
        if !self.cards.contains(card) {
            return Err(GridError::UnknownCard(card));
        }
        self.require_merged_row(tree, row)?;

        let col = self.columns.ensure_thread_at(col_index)?;
        self.cards.move_to(card, row, col)?;
        tracing::debug!(card = %card, row = %row, col_index, "moved card");
        Ok(())
    }

    fn require_merged_row(&self, tree: &dyn SceneTree, row: RowId) -> Result<(), GridError> {
        if self.merged_rows(tree).iter().any(|r| r.id == row) {
            Ok(())
        } else {
            Err(GridError::UnknownRow(row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotgrid_model::UNTITLED_THREAD;
    use plotgrid_test_utils::single_scene_tree;

    #[test]
    fn drop_on_first_ghost_creates_one_column_and_card() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = RowId::for_scene(s1);

        let card = grid.add_card_at(&tree, row, 1).unwrap();

        assert_eq!(grid.columns().len(), 2);
        let col = grid.columns().by_index(1).unwrap();
        assert_eq!(col.title, UNTITLED_THREAD);
        assert_eq!(grid.cards().in_cell(row, col.id).next().unwrap().id, card);
    }

    #[test]
    fn drop_on_deep_ghost_fills_the_gap() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();

        grid.add_card_at(&tree, RowId::for_scene(s1), 3).unwrap();

        assert_eq!(grid.columns().len(), 4);
        assert_eq!(grid.cards().len(), 1);
    }

    #[test]
    fn second_drop_on_same_slot_reuses_the_column() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = RowId::for_scene(s1);

        grid.add_card_at(&tree, row, 1).unwrap();
        grid.add_card_at(&tree, row, 1).unwrap();

        assert_eq!(grid.columns().len(), 2);
        let col = grid.columns().by_index(1).unwrap().id;
        assert_eq!(grid.cards().in_cell(row, col).count(), 2);
    }

    #[test]
    fn structure_slot_rejects_cards() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let err = grid.add_card_at(&tree, RowId::for_scene(s1), 0).unwrap_err();
        assert!(matches!(err, GridError::StructureColumnImmutable));
        assert!(grid.cards().is_empty());
    }

    #[test]
    fn stale_row_rejects_before_materializing() {
        let (tree, _, _) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let err = grid.add_card_at(&tree, RowId::new(), 2).unwrap_err();
        assert!(matches!(err, GridError::UnknownRow(_)));
        assert_eq!(grid.columns().len(), 1);
    }

    #[test]
    fn move_to_ghost_slot_materializes_and_moves() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = RowId::for_scene(s1);
        let card = grid.add_card_at(&tree, row, 1).unwrap();

        grid.update_card_position(&tree, card, row, 2).unwrap();

        assert_eq!(grid.columns().len(), 3);
        let col = grid.columns().by_index(2).unwrap().id;
        assert_eq!(grid.cards().get(card).unwrap().col_id, col);
    }

    #[test]
    fn stale_card_rejects_before_materializing() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let row = RowId::for_scene(s1);
        let err = grid
            .update_card_position(&tree, CardId::new(), row, 4)
            .unwrap_err();
        assert!(matches!(err, GridError::UnknownCard(_)));
        assert_eq!(grid.columns().len(), 1);
    }

    #[test]
    fn card_moves_between_rows() {
        let (tree, _, s1) = single_scene_tree();
        let mut grid = PlotGrid::default();
        let scene_row = RowId::for_scene(s1);
        let custom = grid.insert_row_after(&tree, scene_row).unwrap();
        let card = grid.add_card_at(&tree, scene_row, 1).unwrap();

        grid.update_card_position(&tree, card, custom, 1).unwrap();

        assert_eq!(grid.cards().by_row(scene_row).count(), 0);
        assert_eq!(grid.cards().by_row(custom).count(), 1);
    }
}
