//! Grid projector
//!
//! Pure read side: folds the column registry, the merged row sequence,
//! and the card store into render-ready snapshots. Projections own their
//! data and borrow nothing, so a host can diff them across frames or hand
//! them to another thread.
//!
//! Ghost columns exist only here. The projection always offers at least
//! `ghost_min_columns` slots and keeps `ghost_extra_columns` empty slots
//! past the last real column, so there is always somewhere to drop the
//! next card.

use crate::error::GridError;
use crate::grid::PlotGrid;
use crate::merge::MergedKind;
use crate::view::ViewKind;
use plotgrid_model::{Card, ColumnId, RowId, SceneId, SceneTree};

/// What the host is currently showing, for selection highlighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewContext {
    /// Active view kind
    pub view: ViewKind,
    /// Scene under the cursor in the document tree, if any
    pub selected_scene: Option<SceneId>,
}

impl ViewContext {
    /// Context for a view with nothing selected
    #[inline]
    #[must_use]
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            selected_scene: None,
        }
    }

    /// With a selected scene
    #[inline]
    #[must_use]
    pub fn with_selected_scene(mut self, scene: SceneId) -> Self {
        self.selected_scene = Some(scene);
        self
    }
}

/// One column slot in the projected header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSlot {
    /// The fixed structure column
    Structure {
        /// Registry id
        id: ColumnId,
    },
    /// A real thread column
    Thread {
        /// Registry id
        id: ColumnId,
        /// Display title
        title: String,
    },
    /// A drop target with no backing column yet
    Ghost,
}

impl ColumnSlot {
    /// Backing column id, if the slot is real
    #[inline]
    #[must_use]
    pub fn column_id(&self) -> Option<ColumnId> {
        match self {
            Self::Structure { id } | Self::Thread { id, .. } => Some(*id),
            Self::Ghost => None,
        }
    }
}

/// The structure cell at the head of a projected row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureCell {
    /// Mirrors a live scene
    Scene {
        /// Backing scene
        scene_id: SceneId,
        /// Live title
        title: String,
        /// Live synopsis
        synopsis: String,
    },
    /// A custom row's label
    Placeholder {
        /// User-editable label
        title: String,
    },
}

/// Cards under one column slot of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellProjection {
    /// Backing column, `None` for ghost slots
    pub column: Option<ColumnId>,
    /// Cards stacked in the cell, in creation order
    pub cards: Vec<Card>,
}

/// One projected row
#[derive(Debug, Clone, PartialEq)]
pub struct RowProjection {
    /// Stable row identity
    pub id: RowId,
    /// Chapter title, set on the first row of each chapter
    pub chapter_label: Option<String>,
    /// Head cell
    pub structure: StructureCell,
    /// Whether the backing scene is the host's current selection
    pub selected: bool,
    /// Thread and ghost cells, aligned with `GridProjection::columns[1..]`
    pub cells: Vec<CellProjection>,
}

/// A full render-ready grid snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GridProjection {
    /// Header slots: structure, threads, then ghosts
    pub columns: Vec<ColumnSlot>,
    /// Merged rows in display order
    pub rows: Vec<RowProjection>,
}

impl GridProjection {
    /// Number of ghost slots offered
    #[must_use]
    pub fn ghost_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|s| matches!(s, ColumnSlot::Ghost))
            .count()
    }
}

/// Cards of one thread column, for the sidebar of a single scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarGroup {
    /// Owning thread column's title
    pub column_title: String,
    /// Cards on the scene's row in that column
    pub cards: Vec<Card>,
}

/// Per-scene card summary shown next to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarProjection {
    /// The scene the sidebar describes
    pub scene_id: SceneId,
    /// The scene's row in the grid
    pub row_id: RowId,
    /// Non-empty groups in column display order
    pub groups: Vec<SidebarGroup>,
}

impl PlotGrid {
    /// Project the full grid against the live tree
    #[must_use]
    pub fn project(&self, tree: &dyn SceneTree, ctx: &ViewContext) -> GridProjection {
        let real = self.columns.len();
        let total = (real + self.config.ghost_extra_columns).max(self.config.ghost_min_columns);

        let mut columns = Vec::with_capacity(total);
        for col in self.columns.ordered() {
            columns.push(if col.is_structure() {
                ColumnSlot::Structure { id: col.id }
            } else {
                ColumnSlot::Thread {
                    id: col.id,
                    title: col.title.clone(),
                }
            });
        }
        columns.resize(total, ColumnSlot::Ghost);

        let rows = self
            .merged_rows(tree)
            .into_iter()
            .map(|row| {
                let (chapter_label, structure, selected) = match row.kind {
                    MergedKind::Structural {
                        scene,
                        first_in_chapter,
                    } => (
                        first_in_chapter.then(|| scene.chapter_title.clone()),
                        StructureCell::Scene {
                            scene_id: scene.scene_id,
                            title: scene.title,
                            synopsis: scene.synopsis,
                        },
                        ctx.selected_scene == Some(scene.scene_id),
                    ),
                    MergedKind::Custom { title } => {
                        (None, StructureCell::Placeholder { title }, false)
                    }
                };

                let cells = columns[1..]
                    .iter()
                    .map(|slot| CellProjection {
                        column: slot.column_id(),
                        cards: match slot.column_id() {
                            Some(col) => self.cards.in_cell(row.id, col).cloned().collect(),
                            None => Vec::new(),
                        },
                    })
                    .collect();

                RowProjection {
                    id: row.id,
                    chapter_label,
                    structure,
                    selected,
                    cells,
                }
            })
            .collect();

        GridProjection { columns, rows }
    }

    /// Project the card sidebar for a single scene
    ///
    /// Groups the scene's row cards by thread column, in column display
    /// order, skipping columns with no cards on that row.
    ///
    /// # Errors
    /// `UnknownScene` when the scene is not in the live tree.
    pub fn sidebar(
        &self,
        tree: &dyn SceneTree,
        scene: SceneId,
    ) -> Result<SidebarProjection, GridError> {
        if tree.scene(scene).is_none() {
            return Err(GridError::UnknownScene(scene));
        }

        let row_id = self
            .rows
            .promoted_scene_rows()
            .find_map(|(s, row)| (s == scene).then_some(row))
            .unwrap_or_else(|| RowId::for_scene(scene));

        let groups = self
            .columns
            .threads()
            .filter_map(|col| {
                let cards: Vec<Card> = self.cards.in_cell(row_id, col.id).cloned().collect();
                (!cards.is_empty()).then(|| SidebarGroup {
                    column_title: col.title.clone(),
                    cards,
                })
            })
            .collect();

        Ok(SidebarProjection {
            scene_id: scene,
            row_id,
            groups,
        })
    }
}
