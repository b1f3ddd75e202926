use std::fmt;

/// The scene currently on screen. Replaced wholesale every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub narration: String,
    /// Suggested next actions. Emptied while a turn is in flight.
    pub actions: Vec<String>,
    pub image_prompt: String,
}

/// A validated scene response from the text service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneUpdate {
    pub narration: String,
    pub actions: Vec<String>,
    pub new_inventory_items: Vec<String>,
    pub image_prompt: String,
}

impl SceneUpdate {
    pub fn scene(&self) -> Scene {
        Scene {
            narration: self.narration.clone(),
            actions: self.actions.clone(),
            image_prompt: self.image_prompt.clone(),
        }
    }
}

/// A decoded illustration, ready to upload as a texture.
#[derive(Clone, PartialEq, Eq)]
pub struct SceneImage {
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA8, row-major.
    pub rgba: Vec<u8>,
}

impl SceneImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

impl fmt::Debug for SceneImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}
