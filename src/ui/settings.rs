use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

pub const ACTION_COLOR: &str = "Action";
pub const NARRATION_COLOR: &str = "Narration";

pub const UI_SCALE_RANGE: RangeInclusive<f32> = 0.75..=2.0;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Journal entry kind → colour
    pub entry_colors: HashMap<String, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut entry_colors = HashMap::new();

        entry_colors.insert(ACTION_COLOR.into(), [40, 70, 120, 255]);
        entry_colors.insert(NARRATION_COLOR.into(), [70, 70, 70, 255]);

        Self {
            ui_scale: 1.0,
            entry_colors,
        }
    }
}

impl UiSettings {
    /// Pulls a hand-edited scale back into the slider's range.
    pub fn sanitized(mut self) -> Self {
        self.ui_scale = if self.ui_scale.is_finite() {
            self.ui_scale.clamp(*UI_SCALE_RANGE.start(), *UI_SCALE_RANGE.end())
        } else {
            UiSettings::default().ui_scale
        };
        self
    }

    pub fn color(&self, key: &str) -> Color32 {
        self.entry_colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::DARK_GRAY)
    }

    pub fn set_color(&mut self, key: &str, color: Color32) {
        self.entry_colors.insert(
            key.to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_falls_back() {
        assert_eq!(UiSettings::default().color("Whisper"), Color32::DARK_GRAY);
    }

    #[test]
    fn set_color_replaces_entry() {
        let mut settings = UiSettings::default();
        settings.set_color(ACTION_COLOR, Color32::from_rgb(1, 2, 3));
        assert_eq!(settings.color(ACTION_COLOR), Color32::from_rgb(1, 2, 3));
        assert_eq!(settings.color(NARRATION_COLOR), Color32::from_rgb(70, 70, 70));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: UiSettings = serde_json::from_str(r#"{"ui_scale":1.5}"#).unwrap();
        assert_eq!(settings.ui_scale, 1.5);
        assert_eq!(settings.entry_colors, UiSettings::default().entry_colors);
    }

    #[test]
    fn out_of_range_scale_is_clamped() {
        let settings = |scale: f32| UiSettings {
            ui_scale: scale,
            ..Default::default()
        };

        assert_eq!(settings(0.0).sanitized().ui_scale, 0.75);
        assert_eq!(settings(-3.0).sanitized().ui_scale, 0.75);
        assert_eq!(settings(9.0).sanitized().ui_scale, 2.0);
        assert_eq!(settings(f32::NAN).sanitized().ui_scale, 1.0);
        assert_eq!(settings(1.25).sanitized().ui_scale, 1.25);
    }
}
