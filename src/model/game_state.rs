use std::sync::Arc;

use crate::engine::protocol::{EngineCommand, EngineResponse, TurnRequest};
use crate::model::scene::SceneImage;
use crate::model::session::Session;
use crate::model::setup::{Genre, SetupConfig};

pub const START_FAILED_MESSAGE: &str =
    "Failed to start the adventure. Please check your API key and try again.";
pub const TURN_FAILED_MESSAGE: &str =
    "The story could not continue. An unexpected error occurred.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingStage {
    /// Waiting for the opening scene and its image.
    Initial { genre: Genre },
    /// Waiting for the next scene. `pending` holds the log with the action
    /// and placeholder already appended.
    Turn { pending: Session },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Setup,
    Loading(LoadingStage),
    Playing,
    Error { message: String },
}

/// The single-session state machine driven by the UI.
///
/// Operations hand back the engine command to dispatch, if any. Responses
/// for a replaced session are recognised by epoch and dropped.
#[derive(Debug)]
pub struct GameState {
    phase: Phase,
    session: Session,
    last_epoch: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: Phase::Setup,
            session: Session::empty(0),
            last_epoch: 0,
        }
    }
}

impl GameState {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The last committed session.
    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// What the play screen should show: the pending session while a turn is
    /// in flight, otherwise the committed one.
    pub fn visible_session(&self) -> &Session {
        match &self.phase {
            Phase::Loading(LoadingStage::Turn { pending }) => pending,
            _ => &self.session,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    pub fn start_adventure(&mut self, config: SetupConfig) -> Option<EngineCommand> {
        if self.phase != Phase::Setup {
            log::warn!("ignoring start request outside setup");
            return None;
        }

        self.session = Session::empty(self.next_epoch());
        self.phase = Phase::Loading(LoadingStage::Initial {
            genre: config.genre,
        });

        log::info!("starting {} adventure", config.genre);

        Some(EngineCommand::StartAdventure {
            epoch: self.session.epoch,
            config,
        })
    }

    /// No-op (and no request) unless playing with suggested actions on offer.
    pub fn submit_action(&mut self, action: &str) -> Option<EngineCommand> {
        let action = action.trim();
        if self.phase != Phase::Playing || action.is_empty() {
            return None;
        }

        let genre = self.session.genre?;
        let pending = self.session.begin_turn(action)?;
        let turn = pending.turn;

        let request = TurnRequest {
            genre,
            story_log: self.session.story_log.clone(),
            inventory: self.session.inventory.clone(),
            action: action.to_string(),
        };

        self.phase = Phase::Loading(LoadingStage::Turn { pending });

        Some(EngineCommand::ContinueAdventure {
            epoch: self.session.epoch,
            turn,
            request,
        })
    }

    /// Clears everything and goes back to the setup screen. Valid anywhere.
    pub fn restart(&mut self) {
        self.session = Session::empty(self.next_epoch());
        self.phase = Phase::Setup;
    }

    pub fn handle_response(&mut self, response: EngineResponse) -> Option<EngineCommand> {
        match response {
            EngineResponse::AdventureStarted { epoch, result } => {
                let genre = match &self.phase {
                    Phase::Loading(LoadingStage::Initial { genre }) if epoch == self.session.epoch => *genre,
                    _ => {
                        log::debug!("dropping stale opening scene for epoch {epoch}");
                        return None;
                    }
                };

                match result {
                    Ok((update, image)) => {
                        self.session = Session::from_initial(epoch, genre, update, image);
                        self.phase = Phase::Playing;
                    }
                    Err(err) => {
                        log::error!("could not start adventure: {err}");
                        self.session = Session::empty(self.next_epoch());
                        self.phase = Phase::Error {
                            message: START_FAILED_MESSAGE.into(),
                        };
                    }
                }
                None
            }

            EngineResponse::SceneContinued { epoch, turn, result } => {
                let pending = match &self.phase {
                    Phase::Loading(LoadingStage::Turn { pending })
                        if epoch == pending.epoch && turn == pending.turn =>
                    {
                        pending.clone()
                    }
                    _ => {
                        log::debug!("dropping stale scene for epoch {epoch} turn {turn}");
                        return None;
                    }
                };

                match result {
                    Ok(update) => {
                        let image_prompt = update.image_prompt.clone();
                        self.session = pending.complete_turn(update);
                        self.phase = Phase::Playing;

                        Some(EngineCommand::RenderSceneImage {
                            epoch,
                            turn,
                            image_prompt,
                        })
                    }
                    Err(err) => {
                        log::error!("turn {turn} could not continue: {err}");
                        self.phase = Phase::Error {
                            message: TURN_FAILED_MESSAGE.into(),
                        };
                        None
                    }
                }
            }

            EngineResponse::SceneImageReady { epoch, turn, result } => {
                if epoch != self.session.epoch {
                    log::debug!("dropping image for replaced session {epoch}");
                    return None;
                }

                match result {
                    Ok(image) => self.apply_image(turn, Arc::new(image)),
                    Err(err) => log::warn!("image for turn {turn} failed, keeping previous: {err}"),
                }
                None
            }
        }
    }

    fn apply_image(&mut self, turn: u32, image: Arc<SceneImage>) {
        let Some(next) = self.session.with_image(turn, image.clone()) else {
            log::debug!("dropping image for turn {turn}, a newer one is shown");
            return;
        };
        self.session = next;

        if let Phase::Loading(LoadingStage::Turn { pending }) = &self.phase {
            if let Some(next) = pending.with_image(turn, image) {
                self.phase = Phase::Loading(LoadingStage::Turn { pending: next });
            }
        }
    }

    fn next_epoch(&mut self) -> u64 {
        self.last_epoch += 1;
        self.last_epoch
    }
}
