use std::sync::Arc;

use crate::model::inventory::Inventory;
use crate::model::scene::{Scene, SceneImage, SceneUpdate};
use crate::model::setup::Genre;

/// The one live playthrough.
///
/// Transitions never mutate in place: each returns a new `Session`, so a
/// replaced session can be recognised by its `epoch` when a late response
/// arrives for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub epoch: u64,
    /// Number of player turns taken so far.
    pub turn: u32,
    pub story_log: Vec<String>,
    pub current_scene: Option<Scene>,
    pub inventory: Inventory,
    pub image: Option<Arc<SceneImage>>,
    /// Turn the shown image was generated for.
    pub image_turn: u32,
    pub genre: Option<Genre>,
}

impl Session {
    pub fn empty(epoch: u64) -> Self {
        Self {
            epoch,
            turn: 0,
            story_log: Vec::new(),
            current_scene: None,
            inventory: Inventory::default(),
            image: None,
            image_turn: 0,
            genre: None,
        }
    }

    pub fn from_initial(epoch: u64, genre: Genre, update: SceneUpdate, image: SceneImage) -> Self {
        Self {
            epoch,
            turn: 0,
            story_log: vec![update.narration.clone()],
            current_scene: Some(update.scene()),
            inventory: Inventory::from_items(update.new_inventory_items),
            image: Some(Arc::new(image)),
            image_turn: 0,
            genre: Some(genre),
        }
    }

    /// Actions the player may pick right now. Empty while a turn is in flight.
    pub fn available_actions(&self) -> &[String] {
        self.current_scene
            .as_ref()
            .map(|scene| scene.actions.as_slice())
            .unwrap_or(&[])
    }

    /// Records the chosen action and a placeholder for the narration to come.
    ///
    /// Returns `None` when no action can be taken: no scene yet, or the
    /// previous turn has not resolved.
    pub fn begin_turn(&self, action: &str) -> Option<Session> {
        let scene = self.current_scene.as_ref()?;
        if scene.actions.is_empty() {
            return None;
        }

        let mut next = self.clone();
        next.turn += 1;
        next.story_log.push(format!("> {action}"));
        next.story_log.push(String::new());
        next.current_scene = Some(Scene {
            actions: Vec::new(),
            ..scene.clone()
        });

        Some(next)
    }

    /// Fills in the placeholder left by `begin_turn`.
    pub fn complete_turn(&self, update: SceneUpdate) -> Session {
        let mut next = self.clone();
        let scene = update.scene();

        match next.story_log.len().checked_sub(1) {
            Some(last) if next.story_log[last].is_empty() => next.story_log[last] = update.narration,
            _ => next.story_log.push(update.narration),
        }
        next.current_scene = Some(scene);
        next.inventory = self.inventory.merged(update.new_inventory_items);
        debug_assert!(next.inventory.is_superset_of(&self.inventory));

        next
    }

    /// Shows `image` unless a newer turn's image is already on screen.
    pub fn with_image(&self, turn: u32, image: Arc<SceneImage>) -> Option<Session> {
        if turn < self.image_turn {
            return None;
        }

        let mut next = self.clone();
        next.image = Some(image);
        next.image_turn = turn;

        Some(next)
    }
}
