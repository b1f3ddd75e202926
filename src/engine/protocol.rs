use crate::engine::error::AdventureError;
use crate::model::inventory::Inventory;
use crate::model::scene::{SceneImage, SceneUpdate};
use crate::model::setup::{Genre, SetupConfig};

/// Everything the scene service needs to continue the story.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub genre: Genre,
    /// The log before this turn's action was appended.
    pub story_log: Vec<String>,
    pub inventory: Inventory,
    pub action: String,
}

/// UI → engine. Every command is tagged with the session epoch it belongs to.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    StartAdventure {
        epoch: u64,
        config: SetupConfig,
    },
    ContinueAdventure {
        epoch: u64,
        turn: u32,
        request: TurnRequest,
    },
    RenderSceneImage {
        epoch: u64,
        turn: u32,
        image_prompt: String,
    },
}

/// Engine → UI.
#[derive(Debug)]
pub enum EngineResponse {
    AdventureStarted {
        epoch: u64,
        result: Result<(SceneUpdate, SceneImage), AdventureError>,
    },
    SceneContinued {
        epoch: u64,
        turn: u32,
        result: Result<SceneUpdate, AdventureError>,
    },
    SceneImageReady {
        epoch: u64,
        turn: u32,
        result: Result<SceneImage, AdventureError>,
    },
}

impl EngineCommand {
    pub fn short_name(&self) -> &'static str {
        match self {
            EngineCommand::StartAdventure { .. } => "StartAdventure",
            EngineCommand::ContinueAdventure { .. } => "ContinueAdventure",
            EngineCommand::RenderSceneImage { .. } => "RenderSceneImage",
        }
    }
}
