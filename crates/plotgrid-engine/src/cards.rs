//! Card store
//!
//! The sparse set of plot cards, keyed by id and queried by row or by
//! `(row, column)` cell. Iteration order is insertion order, which the
//! projector relies on for stable card stacking inside a cell.

use crate::error::GridError;
use indexmap::IndexMap;
use plotgrid_model::{Card, CardId, ColumnId, RowId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sparse store of all cards in the grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardStore {
    cards: IndexMap<CardId, Card>,
}

impl CardStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a persisted card list
    #[must_use]
    pub fn from_cards(persisted: Vec<Card>) -> Self {
        Self {
            cards: persisted.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Number of cards
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the store holds no cards
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Whether `id` names a stored card
    #[inline]
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// All cards in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Cards attached to a row, in insertion order
    pub fn by_row(&self, row: RowId) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.row_id == row)
    }

    /// Cards in a single cell, in insertion order
    pub fn in_cell(&self, row: RowId, col: ColumnId) -> impl Iterator<Item = &Card> {
        self.cards
            .values()
            .filter(move |c| c.row_id == row && c.col_id == col)
    }

    /// Snapshot of the card list, for persistence
    #[must_use]
    pub fn to_cards(&self) -> Vec<Card> {
        self.cards.values().cloned().collect()
    }

    /// Insert a card, returning its id
    pub fn insert(&mut self, card: Card) -> CardId {
        let id = card.id;
        self.cards.insert(id, card);
        id
    }

    /// Update a card's title and content
    ///
    /// # Errors
    /// `UnknownCard` for stale ids.
    pub fn update_text(
        &mut self,
        id: CardId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), GridError> {
        let card = self.cards.get_mut(&id).ok_or(GridError::UnknownCard(id))?;
        card.title = title.into();
        card.content = content.into();
        Ok(())
    }

    /// Re-point a card to another cell
    ///
    /// # Errors
    /// `UnknownCard` for stale ids.
    pub fn move_to(&mut self, id: CardId, row: RowId, col: ColumnId) -> Result<(), GridError> {
        let card = self.cards.get_mut(&id).ok_or(GridError::UnknownCard(id))?;
        card.move_to(row, col);
        Ok(())
    }

    /// Remove a card
    ///
    /// # Errors
    /// `UnknownCard` for stale ids.
    pub fn remove(&mut self, id: CardId) -> Result<Card, GridError> {
        self.cards
            .shift_remove(&id)
            .ok_or(GridError::UnknownCard(id))
    }

    /// Cascade: remove every card attached to `row`, returning the count
    pub fn remove_by_row(&mut self, row: RowId) -> usize {
        let before = self.cards.len();
        self.cards.retain(|_, c| c.row_id != row);
        before - self.cards.len()
    }

    /// Cascade: remove every card in column `col`, returning the count
    pub fn remove_by_column(&mut self, col: ColumnId) -> usize {
        let before = self.cards.len();
        self.cards.retain(|_, c| c.col_id != col);
        before - self.cards.len()
    }

    /// Remove cards whose row is not in `live_rows`, returning the count
    ///
    /// Used by the sync bridge's orphan cascade after external scene
    /// deletion.
    pub fn remove_orphaned(&mut self, live_rows: &HashSet<RowId>) -> usize {
        let before = self.cards.len();
        self.cards.retain(|_, c| live_rows.contains(&c.row_id));
        before - self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotgrid_model::UNTITLED_CARD;

    fn card(row: RowId, col: ColumnId) -> Card {
        Card::new(row, col, UNTITLED_CARD, "")
    }

    #[test]
    fn insert_and_lookup() {
        let mut store = CardStore::new();
        let id = store.insert(card(RowId::new(), ColumnId::new()));
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn by_row_filters() {
        let mut store = CardStore::new();
        let row = RowId::new();
        let col = ColumnId::new();
        store.insert(card(row, col));
        store.insert(card(row, ColumnId::new()));
        store.insert(card(RowId::new(), col));
        assert_eq!(store.by_row(row).count(), 2);
    }

    #[test]
    fn in_cell_matches_both_axes() {
        let mut store = CardStore::new();
        let row = RowId::new();
        let col = ColumnId::new();
        let id = store.insert(card(row, col));
        store.insert(card(row, ColumnId::new()));
        let found: Vec<_> = store.in_cell(row, col).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
    }

    #[test]
    fn remove_by_row_cascades_exactly() {
        let mut store = CardStore::new();
        let doomed = RowId::new();
        store.insert(card(doomed, ColumnId::new()));
        store.insert(card(doomed, ColumnId::new()));
        let survivor = store.insert(card(RowId::new(), ColumnId::new()));
        assert_eq!(store.remove_by_row(doomed), 2);
        assert_eq!(store.len(), 1);
        assert!(store.contains(survivor));
    }

    #[test]
    fn remove_by_column_cascades_exactly() {
        let mut store = CardStore::new();
        let doomed = ColumnId::new();
        store.insert(card(RowId::new(), doomed));
        let survivor = store.insert(card(RowId::new(), ColumnId::new()));
        assert_eq!(store.remove_by_column(doomed), 1);
        assert!(store.contains(survivor));
    }

    #[test]
    fn remove_orphaned_keeps_live_rows() {
        let mut store = CardStore::new();
        let live = RowId::new();
        store.insert(card(live, ColumnId::new()));
        store.insert(card(RowId::new(), ColumnId::new()));
        let mut live_rows = HashSet::new();
        live_rows.insert(live);
        assert_eq!(store.remove_orphaned(&live_rows), 1);
        assert_eq!(store.by_row(live).count(), 1);
    }

    #[test]
    fn stale_ids_are_rejected_without_mutation() {
        let mut store = CardStore::new();
        let id = store.insert(card(RowId::new(), ColumnId::new()));
        let stale = CardId::new();
        assert!(matches!(
            store.update_text(stale, "t", "c"),
            Err(GridError::UnknownCard(_))
        ));
        assert!(matches!(store.remove(stale), Err(GridError::UnknownCard(_))));
        assert!(store.contains(id));
    }
}
