mod engine;
mod model;
mod ui;

use anyhow::Context;
use eframe::egui;
use std::sync::Arc;

use crate::engine::config::ServiceConfig;
use crate::engine::engine::Services;
use crate::engine::llm_client::GeminiClient;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env()?;
    log::info!("starting with {config:?}");

    let client = Arc::new(GeminiClient::new(config).context("failed to build HTTP client")?);
    let services = Services {
        scenes: client.clone(),
        images: client,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gemini Adventure")
            .with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gemini Adventure",
        options,
        Box::new(move |cc| Ok(Box::new(ui::app::AdventureApp::new(&cc.egui_ctx, services)))),
    )
    .map_err(|err| anyhow::anyhow!("UI exited with an error: {err}"))
}
