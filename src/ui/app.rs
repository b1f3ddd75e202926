use eframe::egui;
use egui::RichText;
use std::sync::mpsc;
use std::sync::Arc;

use crate::engine::engine::{Engine, Services, Waker};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::game_state::{GameState, LoadingStage, Phase};
use crate::model::setup::{Genre, SetupConfig, DEFAULT_PREMISE};
use crate::ui::center_panel::{draw_scene, SceneTexture};
use crate::ui::left_panel::draw_left_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::{load_settings, save_settings};
use crate::ui::setup_panel::draw_setup;

/// Something the player did this frame. Applied after drawing.
#[derive(Debug)]
pub enum UiAction {
    Start(SetupConfig),
    Act(String),
    Restart,
    SaveSettings,
}

/* =========================
   UI State
   ========================= */

pub struct UiState {
    pub genre: Genre,
    pub premise: String,
    pub action_input: String,
    pub settings: UiSettings,
    pub should_auto_scroll: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            genre: Genre::default(),
            premise: DEFAULT_PREMISE.into(),
            action_input: String::new(),
            settings: UiSettings::default(),
            should_auto_scroll: false,
        }
    }
}

/* =========================
   App
   ========================= */

pub struct AdventureApp {
    game: GameState,
    ui: UiState,
    scene_texture: Option<SceneTexture>,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl AdventureApp {
    pub fn new(ctx: &egui::Context, services: Services) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let repaint = ctx.clone();
        let waker: Waker = Arc::new(move || repaint.request_repaint());

        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, services, waker);
            engine.run();
        });

        Self {
            game: GameState::default(),
            ui: UiState {
                settings: load_settings(),
                ..Default::default()
            },
            scene_texture: None,
            cmd_tx,
            resp_rx,
        }
    }

    fn send_command(&self, cmd: Option<EngineCommand>) {
        let Some(cmd) = cmd else {
            return;
        };

        if let Err(err) = self.cmd_tx.send(cmd) {
            log::error!("engine is gone, dropping {}", err.0.short_name());
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Start(config) => {
                let cmd = self.game.start_adventure(config);
                self.send_command(cmd);
            }
            UiAction::Act(text) => {
                let cmd = self.game.submit_action(&text);
                if cmd.is_some() {
                    self.ui.action_input.clear();
                    self.ui.should_auto_scroll = true;
                }
                self.send_command(cmd);
            }
            UiAction::Restart => {
                self.game.restart();
                self.scene_texture = None;
                self.ui.action_input.clear();
            }
            UiAction::SaveSettings => save_settings(&self.ui.settings),
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for AdventureApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            let follow_up = self.game.handle_response(resp);
            self.send_command(follow_up);
            self.ui.should_auto_scroll = true;
        }

        let mut actions = Vec::new();
        let in_play = matches!(
            self.game.phase(),
            Phase::Playing | Phase::Loading(LoadingStage::Turn { .. })
        );

        draw_header(ctx);
        draw_left_panel(ctx, &mut self.ui, !matches!(self.game.phase(), Phase::Setup), &mut actions);

        if in_play {
            draw_right_panel(
                ctx,
                &mut self.ui,
                self.game.visible_session(),
                self.game.is_busy(),
                &mut actions,
            );
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.game.phase() {
            Phase::Setup => {
                if let Some(config) = draw_setup(ui, &mut self.ui) {
                    actions.push(UiAction::Start(config));
                }
            }
            Phase::Loading(LoadingStage::Initial { .. }) => draw_summoning(ui),
            Phase::Error { message } => {
                if draw_error(ui, message) {
                    actions.push(UiAction::Restart);
                }
            }
            Phase::Playing | Phase::Loading(LoadingStage::Turn { .. }) => draw_scene(
                ui,
                &mut self.scene_texture,
                self.game.visible_session(),
                &self.ui.settings,
                self.ui.should_auto_scroll,
            ),
        });

        self.ui.should_auto_scroll = false;

        for action in actions {
            self.apply(action);
        }
    }
}

/* =========================
   Screens
   ========================= */

fn draw_header(ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(4.0);
            ui.heading(RichText::new("Gemini Adventure").size(28.0).strong());
            ui.label(RichText::new("Your story awaits...").weak());
            ui.add_space(4.0);
        });
    });
}

fn draw_summoning(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.add(egui::Spinner::new().size(32.0));
        ui.label(RichText::new("Summoning the world...").size(20.0).weak());
    });
}

/// Returns true when the player asks for a new adventure.
fn draw_error(ui: &mut egui::Ui, message: &str) -> bool {
    let mut restart = false;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 4.0);
        egui::Frame::group(ui.style())
            .fill(egui::Color32::from_rgb(90, 25, 25))
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.set_max_width(480.0);
                ui.heading(RichText::new("An Error Occurred").color(egui::Color32::WHITE));
                ui.add_space(8.0);
                ui.label(RichText::new(message).color(egui::Color32::WHITE));
                ui.add_space(12.0);
                restart = ui.button("Create New Adventure").clicked();
            });
    });

    restart
}
