use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use corr_studio::analysis::insights::CorrelationPair;
use corr_studio::analysis::CorrelationMethod;
use corr_studio::export::ExportFormat;

use crate::state::AppState;

const POSITIVE_TEXT: Color32 = Color32::from_rgb(22, 163, 74);
const NEGATIVE_TEXT: Color32 = Color32::from_rgb(220, 38, 38);
const ALERT_TEXT: Color32 = Color32::from_rgb(234, 88, 12);

// ---------------------------------------------------------------------------
// Right side panel – insights and column coverage
// ---------------------------------------------------------------------------

/// Render the insights panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Key Insights");
    ui.separator();

    let (Some(session), Some(insights)) = (&state.session, &state.insights) else {
        ui.label("No dataset loaded.");
        return;
    };
    let thresholds = &state.config.insights;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Strongest pairs ----
            ui.strong("Strongest Positive");
            match &insights.strongest_positive {
                Some(pair) => pair_label(ui, pair, POSITIVE_TEXT),
                None => {
                    ui.label(format!(
                        "No strong positive correlations found (> {})",
                        thresholds.strong_positive
                    ));
                }
            }
            ui.add_space(6.0);

            ui.strong("Strongest Negative");
            match &insights.strongest_negative {
                Some(pair) => pair_label(ui, pair, NEGATIVE_TEXT),
                None => {
                    ui.label(format!(
                        "No strong negative correlations found (< {})",
                        thresholds.strong_negative
                    ));
                }
            }
            ui.add_space(6.0);

            // ---- Multicollinearity ----
            let alerts = insights.alerts(thresholds);
            if alerts.is_empty() {
                ui.strong("Multicollinearity");
                ui.label(format!(
                    "No multicollinearity issues detected (all correlations < {})",
                    thresholds.multicollinearity
                ));
            } else {
                ui.label(RichText::new("⚠ Multicollinearity Alert").strong().color(ALERT_TEXT));
                ui.label(format!(
                    "High correlation detected (> {}). Consider removing one feature:",
                    thresholds.multicollinearity
                ));
                for pair in alerts {
                    pair_label(ui, pair, ALERT_TEXT);
                }
            }
            ui.separator();

            // ---- Dataset summary ----
            ui.strong("Dataset Summary");
            egui::Grid::new("summary_grid")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Rows:");
                    ui.label(session.dataset().len().to_string());
                    ui.end_row();
                    ui.label("Features:");
                    ui.label(insights.feature_count.to_string());
                    ui.end_row();
                    ui.label("Correlations:");
                    ui.label(insights.pair_count.to_string());
                    ui.end_row();
                    ui.label("Avg |r|:");
                    ui.label(format!("{:.3}", insights.mean_abs));
                    ui.end_row();
                    ui.label("Max |r|:");
                    ui.label(format!("{:.3}", insights.max_abs));
                    ui.end_row();
                });
            ui.separator();

            // ---- Column coverage ----
            ui.strong("Columns");
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Column");
                    });
                    header.col(|ui| {
                        ui.strong("Numeric");
                    });
                    header.col(|ui| {
                        ui.strong("Used");
                    });
                })
                .body(|mut body| {
                    for (name, coverage) in &state.coverage {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(name);
                            });
                            row.col(|ui| {
                                ui.label(format!(
                                    "{:.0}% ({}/{})",
                                    coverage.ratio() * 100.0,
                                    coverage.numeric,
                                    coverage.total
                                ));
                            });
                            row.col(|ui| {
                                ui.label(if coverage.is_numeric() { "✔" } else { "–" });
                            });
                        });
                    }
                });
        });
}

fn pair_label(ui: &mut Ui, pair: &CorrelationPair, color: Color32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} ↔ {}", pair.first, pair.second));
        ui.label(RichText::new(format!("{:.3}", pair.value)).strong().color(color));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let loaded = state.session.is_some();
            for (label, format) in [
                ("Export PNG…", ExportFormat::Png),
                ("Export CSV…", ExportFormat::Csv),
                ("Export JSON…", ExportFormat::Json),
            ] {
                if ui.add_enabled(loaded, egui::Button::new(label)).clicked() {
                    save_file_dialog(state, format);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        // ---- Method toggle ----
        ui.label("Method:");
        for method in CorrelationMethod::ALL {
            if ui
                .selectable_label(state.method == method, method.to_string())
                .clicked()
            {
                state.set_method(method);
            }
        }

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} rows, {} numeric columns (rev {})",
                state.source_name.as_deref().unwrap_or("data"),
                session.dataset().len(),
                session.numeric_columns().len(),
                session.revision()
            ));
        }

        if let Some(msg) = &state.status_message {
            let color = if state.is_error() {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

fn save_file_dialog(state: &mut AppState, format: ExportFormat) {
    let Some(session) = &state.session else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export correlation matrix")
        .set_file_name(format.default_file_name(session.matrix()))
        .add_filter(format.extension().to_uppercase(), &[format.extension()])
        .save_file();

    if let Some(path) = file {
        state.export(&path, format);
    }
}
