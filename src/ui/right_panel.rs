use eframe::egui;
use egui::RichText;

use crate::model::inventory::Inventory;
use crate::model::session::Session;
use crate::ui::app::{UiAction, UiState};

pub fn draw_right_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    session: &Session,
    busy: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(340.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                draw_inventory(ui, &session.inventory);
                ui.separator();
                if let Some(action) = draw_actions(ui, ui_state, session.available_actions(), busy) {
                    actions.push(UiAction::Act(action));
                }
            });
        });
}

/* =========================
   Inventory
   ========================= */

fn draw_inventory(ui: &mut egui::Ui, inventory: &Inventory) {
    ui.heading(format!("Inventory ({})", inventory.len()));
    ui.add_space(4.0);

    if inventory.is_empty() {
        ui.label(RichText::new("Your pockets are empty.").italics().weak());
    } else {
        for item in inventory.as_slice() {
            ui.label(format!("• {item}"));
        }
    }
}

/* =========================
   Actions
   ========================= */

fn draw_actions(
    ui: &mut egui::Ui,
    state: &mut UiState,
    suggestions: &[String],
    busy: bool,
) -> Option<String> {
    ui.heading("What do you do?");
    ui.add_space(4.0);

    if busy && suggestions.is_empty() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("The world shifts...").weak());
        });
        return None;
    }

    if suggestions.is_empty() {
        ui.label(RichText::new("No paths remain. Start a new adventure to play again.").weak());
        return None;
    }

    let mut chosen = None;

    for suggestion in suggestions {
        let button = egui::Button::new(suggestion.as_str())
            .wrap()
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(!busy, button).clicked() {
            chosen = Some(suggestion.clone());
        }
    }

    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("OR").small().weak());
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let input = ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(&mut state.action_input)
                .hint_text("Type your action...")
                .desired_width(ui.available_width() - 48.0),
        );
        let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let typed = state.action_input.trim();
        let go = ui.add_enabled(!busy && !typed.is_empty(), egui::Button::new("Go"));

        if (go.clicked() || entered) && !typed.is_empty() {
            chosen = Some(typed.to_string());
        }
    });

    chosen
}
