//! Plot cards
//!
//! A card is bound to exactly one `(row, column)` cell. Deleting the row
//! or the column cascades to its cards; moving a card re-points the
//! binding without changing its identity.

use crate::id::{CardId, ColumnId, RowId};
use serde::{Deserialize, Serialize};

/// Default title for freshly created cards
pub const UNTITLED_CARD: &str = "Untitled";

/// A free-form plot card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identifier
    pub id: CardId,
    /// Owning row
    pub row_id: RowId,
    /// Owning column (always a thread column; the structure column
    /// renders scene summaries instead of cards)
    pub col_id: ColumnId,
    /// Short label
    pub title: String,
    /// Free text body
    pub content: String,
}

impl Card {
    /// Create a card in the given cell
    #[inline]
    #[must_use]
    pub fn new(
        row_id: RowId,
        col_id: ColumnId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId::new(),
            row_id,
            col_id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Re-point the card to another cell
    #[inline]
    pub fn move_to(&mut self, row_id: RowId, col_id: ColumnId) {
        self.row_id = row_id;
        self.col_id = col_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_binds_to_cell() {
        let row = RowId::new();
        let col = ColumnId::new();
        let card = Card::new(row, col, "clue", "the butler lied");
        assert_eq!(card.row_id, row);
        assert_eq!(card.col_id, col);
    }

    #[test]
    fn move_keeps_identity_and_text() {
        let mut card = Card::new(RowId::new(), ColumnId::new(), "clue", "body");
        let id = card.id;
        let (row, col) = (RowId::new(), ColumnId::new());
        card.move_to(row, col);
        assert_eq!(card.id, id);
        assert_eq!(card.row_id, row);
        assert_eq!(card.col_id, col);
        assert_eq!(card.title, "clue");
    }

    #[test]
    fn card_serde_round_trip() {
        let card = Card::new(RowId::new(), ColumnId::new(), "t", "c");
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
