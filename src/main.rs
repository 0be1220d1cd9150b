mod app;
mod state;
mod ui;

use std::path::PathBuf;

use app::CorrStudioApp;
use corr_studio::config::{StudioConfig, CONFIG_ENV_VAR};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = StudioConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring ${CONFIG_ENV_VAR}: {e:#}");
        StudioConfig::default()
    });

    let mut state = AppState::new(config);
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "CorrMatrix – Visual Correlation Studio",
        options,
        Box::new(|_cc| Ok(Box::new(CorrStudioApp::new(state)))),
    )
}
