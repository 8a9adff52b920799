//! Scene tree contract
//!
//! The scene tree — the ordered forest of Act → Chapter → Scene — is owned
//! by the surrounding document-editing subsystem. The grid engine reads it
//! through [`SceneTree`] on every projection (titles and synopses are never
//! cached across operations) and mutates it through exactly one entry
//! point, [`SceneTree::create_scene_in_chapter`], used by row promotion.
//! Scene deletion is observed by the engine, never initiated.

use crate::id::{ActId, ChapterId, SceneId};

/// One scene as yielded by the ordered traversal
///
/// Carries read-through display attributes so the grid never stores a
/// scene title or synopsis of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    /// Scene identity
    pub scene_id: SceneId,
    /// Live scene title
    pub title: String,
    /// Live scene synopsis (may be empty)
    pub synopsis: String,
    /// Owning chapter
    pub chapter_id: ChapterId,
    /// Owning chapter title
    pub chapter_title: String,
    /// Owning act
    pub act_id: ActId,
    /// Owning act title
    pub act_title: String,
}

/// Errors surfaced by the scene tree contract
#[derive(Debug, thiserror::Error)]
pub enum SceneTreeError {
    /// Chapter id does not name a live chapter
    #[error("unknown chapter: {0}")]
    UnknownChapter(ChapterId),

    /// Scene id does not name a live scene
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),
}

/// Narrow contract between the grid engine and the document tree
///
/// Implementations must yield scenes in narrative order: act order, then
/// chapter order within the act, then scene order within the chapter.
pub trait SceneTree {
    /// Ordered traversal of every scene in the project
    fn scenes(&self) -> Vec<SceneSummary>;

    /// Look up a single scene
    ///
    /// The default implementation scans the traversal; owners with an
    /// index should override it.
    fn scene(&self, id: SceneId) -> Option<SceneSummary> {
        self.scenes().into_iter().find(|s| s.scene_id == id)
    }

    /// Create a new scene appended to chapter `chapter`, returning its
    /// identity. The tree owns the id; callers must not assume anything
    /// about its relation to existing ids.
    ///
    /// # Errors
    /// Returns [`SceneTreeError::UnknownChapter`] if the chapter is gone.
    fn create_scene_in_chapter(
        &mut self,
        chapter: ChapterId,
        title: &str,
    ) -> Result<SceneId, SceneTreeError>;
}
