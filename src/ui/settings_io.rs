use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("gemini_adventure");
    path.push("ui_settings.json");
    path
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings() -> UiSettings {
    let path = settings_path();
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            log::debug!("using default UI settings: {err:#}");
            UiSettings::default()
        }
    }
}

pub fn save_settings(settings: &UiSettings) {
    let path = settings_path();
    match save_settings_to(&path, settings) {
        Ok(()) => log::info!("saved UI settings to {}", path.display()),
        Err(err) => log::warn!("could not save UI settings: {err:#}"),
    }
}

fn load_settings_from(path: &Path) -> Result<UiSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let settings: UiSettings =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(settings.sanitized())
}

fn save_settings_to(path: &Path, settings: &UiSettings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
