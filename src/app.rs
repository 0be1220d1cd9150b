use eframe::egui;

use crate::state::AppState;
use crate::ui::{heatmap, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CorrStudioApp {
    pub state: AppState,
}

impl CorrStudioApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Load the first file dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.state.load_path(&path);
        }
    }
}

impl eframe::App for CorrStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar and method toggle ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: insights ----
        egui::SidePanel::right("insights_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: heatmap ----
        egui::CentralPanel::default().show(ctx, |ui| {
            heatmap::correlation_heatmap(ui, &self.state);
        });
    }
}
