use eframe::egui;
use egui::{Color32, Layout, RichText};

use crate::model::message::LogEntry;
use crate::model::session::Session;
use crate::ui::settings::{UiSettings, ACTION_COLOR, NARRATION_COLOR};

/// The uploaded scene image, keyed by the session epoch and turn it belongs to.
pub struct SceneTexture {
    key: (u64, u32),
    handle: egui::TextureHandle,
}

pub fn draw_scene(
    ui: &mut egui::Ui,
    cache: &mut Option<SceneTexture>,
    session: &Session,
    settings: &UiSettings,
    auto_scroll: bool,
) {
    let texture = scene_texture(ui.ctx(), cache, session);

    egui::ScrollArea::vertical()
        .id_salt("scene")
        .show(ui, |ui| {
            let width = ui.available_width();
            let size = egui::vec2(width, width * 9.0 / 16.0);

            // ---------- Image ----------
            match texture {
                Some(texture) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(&texture))
                            .fit_to_exact_size(size),
                    );
                }
                None => {
                    egui::Frame::new()
                        .fill(ui.visuals().extreme_bg_color)
                        .show(ui, |ui| {
                            ui.set_min_size(size);
                            ui.vertical_centered(|ui| {
                                ui.add_space((size.y / 2.0 - 20.0).max(0.0));
                                ui.spinner();
                                ui.label(RichText::new("Generating visuals...").weak());
                            });
                        });
                }
            }

            ui.add_space(12.0);

            // ---------- Narration ----------
            if let Some(scene) = &session.current_scene {
                ui.label(RichText::new(&scene.narration).size(16.0));
            }

            ui.add_space(12.0);

            // ---------- Journal ----------
            ui.collapsing("Story so far", |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("journal")
                    .max_height(280.0)
                    .stick_to_bottom(auto_scroll)
                    .show(ui, |ui| {
                        for line in &session.story_log {
                            draw_entry(ui, settings, LogEntry::classify(line));
                        }
                    });
            });
        });
}

fn scene_texture(
    ctx: &egui::Context,
    cache: &mut Option<SceneTexture>,
    session: &Session,
) -> Option<egui::TextureHandle> {
    let image = session.image.as_ref()?;
    let key = (session.epoch, session.image_turn);

    if cache.as_ref().map(|t| t.key) != Some(key) {
        let color = egui::ColorImage::from_rgba_unmultiplied(image.size(), &image.rgba);
        let handle = ctx.load_texture(
            format!("scene-{}-{}", key.0, key.1),
            color,
            egui::TextureOptions::LINEAR,
        );
        *cache = Some(SceneTexture { key, handle });
    }

    cache.as_ref().map(|t| t.handle.clone())
}

fn draw_entry(ui: &mut egui::Ui, settings: &UiSettings, entry: LogEntry<'_>) {
    ui.add_space(6.0);

    match entry {
        LogEntry::Action(text) => {
            ui.with_layout(Layout::right_to_left(egui::Align::TOP), |ui| {
                bubble(ui, settings.color(ACTION_COLOR), &format!("> {text}"));
            });
        }
        LogEntry::Narration(text) => bubble(ui, settings.color(NARRATION_COLOR), text),
        LogEntry::Pending => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("The world shifts...").weak());
            });
        }
    }
}

fn bubble(ui: &mut egui::Ui, color: Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(Color32::WHITE));
        });
}
