use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::engine::error::AdventureError;
use crate::engine::llm_client::{ImageGenerator, SceneGenerator};
use crate::engine::narrative_parser::parse_scene_response;
use crate::engine::prompt_builder::{build_image_prompt, build_initial_request, build_turn_request};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::scene::{SceneImage, SceneUpdate};
use crate::model::setup::SetupConfig;

/// Called after every response is sent so the UI wakes up and drains it.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// The two external services the engine delegates to.
#[derive(Clone)]
pub struct Services {
    pub scenes: Arc<dyn SceneGenerator>,
    pub images: Arc<dyn ImageGenerator>,
}

pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    services: Services,
    waker: Waker,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        services: Services,
        waker: Waker,
    ) -> Self {
        Self {
            rx,
            tx,
            services,
            waker,
        }
    }

    /// Runs until the UI drops its command sender.
    ///
    /// Each command gets its own thread, so a slow image never holds up the
    /// next turn's text.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            log::info!("dispatching {}", cmd.short_name());

            let services = self.services.clone();
            let tx = self.tx.clone();
            let waker = self.waker.clone();

            let spawned = thread::Builder::new()
                .name(format!("adventure-{}", cmd.short_name()))
                .spawn(move || {
                    let response = execute(&services, cmd);
                    if tx.send(response).is_ok() {
                        waker();
                    }
                });

            if let Err(err) = spawned {
                log::error!("could not spawn request thread: {err}");
            }
        }

        log::info!("engine stopped: UI hung up");
    }
}

/// Performs one command against the services. Blocks until it resolves.
pub fn execute(services: &Services, cmd: EngineCommand) -> EngineResponse {
    match cmd {
        EngineCommand::StartAdventure { epoch, config } => {
            let result = start_adventure(services, &config);

            if let Err(err) = &result {
                log::debug!("adventure failed to start: {err}");
            }

            EngineResponse::AdventureStarted { epoch, result }
        }

        EngineCommand::ContinueAdventure {
            epoch,
            turn,
            request,
        } => {
            let payload = build_turn_request(
                request.genre,
                &request.story_log,
                &request.inventory,
                &request.action,
            );
            let result = services
                .scenes
                .generate_scene(&payload)
                .and_then(|raw| parse_scene_response(&raw));

            if let Err(err) = &result {
                log::debug!("turn {turn} failed: {err}");
            }

            EngineResponse::SceneContinued {
                epoch,
                turn,
                result,
            }
        }

        EngineCommand::RenderSceneImage {
            epoch,
            turn,
            image_prompt,
        } => EngineResponse::SceneImageReady {
            epoch,
            turn,
            result: render_image(services, &image_prompt),
        },
    }
}

/// Text, then the dependent image. Either failing fails the start.
fn start_adventure(
    services: &Services,
    config: &SetupConfig,
) -> Result<(SceneUpdate, SceneImage), AdventureError> {
    let payload = build_initial_request(config);
    let raw = services.scenes.generate_scene(&payload)?;
    let update = parse_scene_response(&raw)?;
    let image = render_image(services, &update.image_prompt)?;

    Ok((update, image))
}

fn render_image(services: &Services, image_prompt: &str) -> Result<SceneImage, AdventureError> {
    services.images.generate_image(&build_image_prompt(image_prompt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::prompt_builder::RequestPayload;
    use crate::engine::protocol::TurnRequest;
    use crate::model::inventory::Inventory;
    use crate::model::setup::Genre;
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replays canned scene responses and records what it was asked.
    #[derive(Default)]
    struct FakeScenes {
        pub replies: Mutex<Vec<Result<String, AdventureError>>>,
        pub seen: Mutex<Vec<RequestPayload>>,
    }

    impl FakeScenes {
        pub fn replying(replies: Vec<Result<String, AdventureError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::default(),
            }
        }
    }

    impl SceneGenerator for FakeScenes {
        fn generate_scene(&self, payload: &RequestPayload) -> Result<String, AdventureError> {
            self.seen.lock().unwrap().push(payload.clone());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(AdventureError::RequestFailure("no reply queued".into()));
            }
            replies.remove(0)
        }
    }

    #[derive(Default)]
    struct FakeImages {
        pub fail: bool,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ImageGenerator for FakeImages {
        fn generate_image(&self, prompt: &str) -> Result<SceneImage, AdventureError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(AdventureError::ImageGenerationFailed);
            }
            Ok(SceneImage {
                width: 1,
                height: 1,
                rgba: vec![1, 2, 3, 255],
            })
        }
    }

    fn scene_json(narration: &str, actions: &[&str], items: &[&str]) -> String {
        serde_json::json!({
            "description": narration,
            "actions": actions,
            "newInventoryItems": items,
            "imagePrompt": format!("art of {narration}"),
        })
        .to_string()
    }

    fn services(scenes: FakeScenes, images: FakeImages) -> (Services, Arc<FakeScenes>, Arc<FakeImages>) {
        let scenes = Arc::new(scenes);
        let images = Arc::new(images);
        let services = Services {
            scenes: scenes.clone(),
            images: images.clone(),
        };
        (services, scenes, images)
    }

    fn tavern() -> SetupConfig {
        SetupConfig::new(Genre::Fantasy, "I wake up in a tavern").unwrap()
    }

    #[test]
    fn start_runs_text_then_styled_image() {
        let (services, scenes, images) = services(
            FakeScenes::replying(vec![Ok(scene_json("You wake up...", &["Look around"], &["note"]))]),
            FakeImages::default(),
        );

        let response = execute(&services, EngineCommand::StartAdventure { epoch: 7, config: tavern() });

        let EngineResponse::AdventureStarted { epoch, result } = response else {
            panic!("unexpected response");
        };
        assert_eq!(epoch, 7);
        let (update, image) = result.unwrap();
        assert_eq!(update.narration, "You wake up...");
        assert_eq!(image.size(), [1, 1]);

        assert!(scenes.seen.lock().unwrap()[0].user_content.contains("I wake up in a tavern"));
        assert_eq!(
            images.prompts.lock().unwrap().as_slice(),
            ["art of You wake up..., cinematic, ultra detailed, atmospheric lighting".to_string()]
        );
    }

    #[test]
    fn start_fails_when_image_fails() {
        let (services, _, _) = services(
            FakeScenes::replying(vec![Ok(scene_json("You wake up...", &["Look around"], &[]))]),
            FakeImages {
                fail: true,
                ..Default::default()
            },
        );

        let response = execute(&services, EngineCommand::StartAdventure { epoch: 1, config: tavern() });
        assert!(matches!(
            response,
            EngineResponse::AdventureStarted {
                result: Err(AdventureError::ImageGenerationFailed),
                ..
            }
        ));
    }

    #[test]
    fn malformed_start_skips_image() {
        let (services, _, images) = services(
            FakeScenes::replying(vec![Ok("{\"description\":\"half".into())]),
            FakeImages::default(),
        );

        let response = execute(&services, EngineCommand::StartAdventure { epoch: 1, config: tavern() });
        assert!(matches!(
            response,
            EngineResponse::AdventureStarted {
                result: Err(AdventureError::MalformedResponse(_)),
                ..
            }
        ));
        assert!(images.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn continue_sends_turn_context_and_skips_image() {
        let (services, scenes, images) = services(
            FakeScenes::replying(vec![Ok(scene_json("The tavern is dim...", &["Leave"], &[]))]),
            FakeImages::default(),
        );

        let request = TurnRequest {
            genre: Genre::Fantasy,
            story_log: vec!["You wake up...".into()],
            inventory: Inventory::from_items(vec!["note".to_string()]),
            action: "Look around".into(),
        };
        let response = execute(
            &services,
            EngineCommand::ContinueAdventure { epoch: 2, turn: 1, request },
        );

        let EngineResponse::SceneContinued { epoch, turn, result } = response else {
            panic!("unexpected response");
        };
        assert_eq!((epoch, turn), (2, 1));
        assert_eq!(result.unwrap().actions, vec!["Leave"]);

        let seen = scenes.seen.lock().unwrap();
        assert!(seen[0].user_content.contains("[note]"));
        assert!(seen[0].user_content.contains("\"Look around\""));
        assert!(images.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn engine_thread_answers_and_wakes_the_ui() {
        let (services, _, _) = services(FakeScenes::default(), FakeImages::default());
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let (wake_tx, wake_rx) = mpsc::channel();
        let wake_tx = Mutex::new(wake_tx);
        let waker: Waker = Arc::new(move || {
            let _ = wake_tx.lock().unwrap().send(());
        });

        let handle = thread::spawn(move || Engine::new(cmd_rx, resp_tx, services, waker).run());

        cmd_tx
            .send(EngineCommand::RenderSceneImage {
                epoch: 4,
                turn: 3,
                image_prompt: "a lighthouse".into(),
            })
            .unwrap();

        let response = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            response,
            EngineResponse::SceneImageReady { epoch: 4, turn: 3, result: Ok(_) }
        ));
        wake_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        drop(cmd_tx);
        handle.join().unwrap();
    }
}
