use eframe::egui;

use crate::ui::app::{UiAction, UiState};
use crate::ui::settings::{ACTION_COLOR, NARRATION_COLOR, UI_SCALE_RANGE};

pub fn draw_left_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    in_game: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::SidePanel::left("left")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Settings");
            ui.separator();

            ui.label("UI Scale");
            ui.add(egui::Slider::new(&mut ui_state.settings.ui_scale, UI_SCALE_RANGE));

            ui.add_space(8.0);
            ui.label("Journal colours");
            for (key, label) in [(ACTION_COLOR, "Your actions"), (NARRATION_COLOR, "Narration")] {
                ui.horizontal(|ui| {
                    let mut color = ui_state.settings.color(key);
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        ui_state.settings.set_color(key, color);
                    }
                    ui.label(label);
                });
            }

            ui.add_space(8.0);
            if ui.button("Save settings").clicked() {
                actions.push(UiAction::SaveSettings);
            }

            if in_game {
                ui.separator();
                if ui.button("New Adventure").clicked() {
                    actions.push(UiAction::Restart);
                }
            }
        });
}
