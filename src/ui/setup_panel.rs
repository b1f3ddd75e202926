use eframe::egui;
use egui::RichText;

use crate::model::setup::{Genre, SetupConfig};
use crate::ui::app::UiState;

/// The setup form. Returns the config once the player presses Start.
pub fn draw_setup(ui: &mut egui::Ui, state: &mut UiState) -> Option<SetupConfig> {
    let mut submitted = None;

    ui.vertical_centered(|ui| {
        ui.set_max_width(680.0);
        ui.add_space(24.0);
        ui.heading(RichText::new("Create Your Adventure").size(26.0));
        ui.label(RichText::new("Set the stage for your unique story.").weak());
        ui.add_space(20.0);

        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.label(RichText::new("1. Choose a Genre").strong());
            ui.horizontal_wrapped(|ui| {
                for genre in Genre::ALL {
                    ui.selectable_value(&mut state.genre, genre, genre.label());
                }
            });

            ui.add_space(16.0);
            ui.label(RichText::new("2. Describe Your Starting Scene").strong());
            ui.add(
                egui::TextEdit::multiline(&mut state.premise)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("e.g., In a neon-drenched alley, rain sizzles on the hot asphalt..."),
            );

            ui.add_space(16.0);
            let config = SetupConfig::new(state.genre, &state.premise);
            let start = ui.add_enabled(
                config.is_some(),
                egui::Button::new(RichText::new("Start Adventure").size(18.0))
                    .min_size(egui::vec2(ui.available_width(), 40.0)),
            );

            if start.clicked() {
                submitted = config;
            }
        });
    });

    submitted
}
