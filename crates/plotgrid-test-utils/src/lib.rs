//! Testing utilities for the plot grid workspace
//!
//! Shared fixtures: an in-memory [`SceneTree`] implementation standing in
//! for the external document tree, plus builders for common shapes.

#![allow(missing_docs)]

use plotgrid_model::{ActId, ChapterId, SceneId, SceneSummary, SceneTree, SceneTreeError};

/// In-memory Act → Chapter → Scene forest
///
/// Mirrors the contract of the real document tree closely enough for
/// engine tests: ordered traversal, live title/synopsis reads, scene
/// creation in a chapter, and external scene deletion.
#[derive(Debug, Default, Clone)]
pub struct MemorySceneTree {
    acts: Vec<ActNode>,
}

#[derive(Debug, Clone)]
struct ActNode {
    id: ActId,
    title: String,
    chapters: Vec<ChapterNode>,
}

#[derive(Debug, Clone)]
struct ChapterNode {
    id: ChapterId,
    title: String,
    scenes: Vec<SceneNode>,
}

#[derive(Debug, Clone)]
struct SceneNode {
    id: SceneId,
    title: String,
    synopsis: String,
}

impl MemorySceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_act(&mut self, title: impl Into<String>) -> ActId {
        let id = ActId::new();
        self.acts.push(ActNode {
            id,
            title: title.into(),
            chapters: Vec::new(),
        });
        id
    }

    pub fn add_chapter(&mut self, act: ActId, title: impl Into<String>) -> ChapterId {
        let id = ChapterId::new();
        let act = self
            .acts
            .iter_mut()
            .find(|a| a.id == act)
            .expect("fixture act exists");
        act.chapters.push(ChapterNode {
            id,
            title: title.into(),
            scenes: Vec::new(),
        });
        id
    }

    pub fn add_scene(
        &mut self,
        chapter: ChapterId,
        title: impl Into<String>,
        synopsis: impl Into<String>,
    ) -> SceneId {
        let id = SceneId::new();
        let chapter = self
            .chapter_mut(chapter)
            .expect("fixture chapter exists");
        chapter.scenes.push(SceneNode {
            id,
            title: title.into(),
            synopsis: synopsis.into(),
        });
        id
    }

    /// Simulate the document tree deleting a scene out from under the grid.
    pub fn remove_scene(&mut self, scene: SceneId) -> bool {
        for act in &mut self.acts {
            for chapter in &mut act.chapters {
                let before = chapter.scenes.len();
                chapter.scenes.retain(|s| s.id != scene);
                if chapter.scenes.len() != before {
                    return true;
                }
            }
        }
        false
    }

    /// Simulate a scene edit in the external editor.
    pub fn set_scene_text(
        &mut self,
        scene: SceneId,
        title: impl Into<String>,
        synopsis: impl Into<String>,
    ) -> bool {
        for act in &mut self.acts {
            for chapter in &mut act.chapters {
                if let Some(s) = chapter.scenes.iter_mut().find(|s| s.id == scene) {
                    s.title = title.into();
                    s.synopsis = synopsis.into();
                    return true;
                }
            }
        }
        false
    }

    pub fn scene_count(&self) -> usize {
        self.acts
            .iter()
            .flat_map(|a| &a.chapters)
            .map(|c| c.scenes.len())
            .sum()
    }

    /// Ordered scene ids within `chapter`, for asserting append position.
    pub fn scenes_in_chapter(&self, chapter: ChapterId) -> Vec<SceneId> {
        self.acts
            .iter()
            .flat_map(|a| &a.chapters)
            .filter(|c| c.id == chapter)
            .flat_map(|c| c.scenes.iter().map(|s| s.id))
            .collect()
    }

    fn chapter_mut(&mut self, id: ChapterId) -> Option<&mut ChapterNode> {
        self.acts
            .iter_mut()
            .flat_map(|a| &mut a.chapters)
            .find(|c| c.id == id)
    }
}

impl SceneTree for MemorySceneTree {
    fn scenes(&self) -> Vec<SceneSummary> {
        let mut out = Vec::new();
        for act in &self.acts {
            for chapter in &act.chapters {
                for scene in &chapter.scenes {
                    out.push(SceneSummary {
                        scene_id: scene.id,
                        title: scene.title.clone(),
                        synopsis: scene.synopsis.clone(),
                        chapter_id: chapter.id,
                        chapter_title: chapter.title.clone(),
                        act_id: act.id,
                        act_title: act.title.clone(),
                    });
                }
            }
        }
        out
    }

    fn create_scene_in_chapter(
        &mut self,
        chapter: ChapterId,
        title: &str,
    ) -> Result<SceneId, SceneTreeError> {
        let chapter = self
            .chapter_mut(chapter)
            .ok_or(SceneTreeError::UnknownChapter(chapter))?;
        let id = SceneId::new();
        chapter.scenes.push(SceneNode {
            id,
            title: title.to_string(),
            synopsis: String::new(),
        });
        Ok(id)
    }
}

/// One act, one chapter ("Ch1"), one scene ("S1"); the smallest useful tree.
pub fn single_scene_tree() -> (MemorySceneTree, ChapterId, SceneId) {
    let mut tree = MemorySceneTree::new();
    let act = tree.add_act("Act I");
    let ch1 = tree.add_chapter(act, "Ch1");
    let s1 = tree.add_scene(ch1, "S1", "It begins.");
    (tree, ch1, s1)
}

/// Two chapters with two scenes each, in one act.
pub fn two_chapter_tree() -> (MemorySceneTree, Vec<ChapterId>, Vec<SceneId>) {
    let mut tree = MemorySceneTree::new();
    let act = tree.add_act("Act I");
    let ch1 = tree.add_chapter(act, "Ch1");
    let s1 = tree.add_scene(ch1, "S1", "arrival");
    let s2 = tree.add_scene(ch1, "S2", "the letter");
    let ch2 = tree.add_chapter(act, "Ch2");
    let s3 = tree.add_scene(ch2, "S3", "pursuit");
    let s4 = tree.add_scene(ch2, "S4", "revelation");
    (tree, vec![ch1, ch2], vec![s1, s2, s3, s4])
}
