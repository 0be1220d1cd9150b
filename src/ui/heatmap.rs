use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};

use corr_studio::analysis::CorrelationMatrix;
use corr_studio::color::{correlation_color, label_color};

use crate::state::AppState;

/// Room reserved for row/column labels.
const LABEL_MARGIN: f32 = 100.0;
const MAX_CELL: f32 = 40.0;
const MAX_LABEL_CHARS: usize = 10;
const SCALE_STEPS: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

// ---------------------------------------------------------------------------
// Correlation heatmap (central panel)
// ---------------------------------------------------------------------------

/// Render the heatmap in the central panel.
pub fn correlation_heatmap(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open or drop a CSV file to explore correlations  (File → Open CSV…)");
            });
            return;
        }
    };

    let matrix = session.matrix();
    ui.heading(format!("Correlation Heatmap ({})", matrix.method));
    ui.separator();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| draw_matrix(ui, matrix));
}

fn draw_matrix(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let k = matrix.size();
    let cell = (400.0 / k as f32).min(MAX_CELL);
    let grid = cell * k as f32;
    let legend_width = 80.0;
    let size = Vec2::new(LABEL_MARGIN + grid + legend_width, LABEL_MARGIN + grid);

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + Vec2::splat(LABEL_MARGIN);
    let text_color = to_color32(label_color(0.0));
    let label_font = FontId::proportional(12.0);
    let value_font = FontId::proportional(if cell > 30.0 { 10.0 } else { 8.0 });

    for (i, name) in matrix.columns.iter().enumerate() {
        let center = origin.x + i as f32 * cell + cell / 2.0;
        painter.text(
            Pos2::new(center, origin.y - 10.0),
            Align2::CENTER_BOTTOM,
            truncate(name),
            label_font.clone(),
            text_color,
        );
        painter.text(
            Pos2::new(origin.x - 10.0, origin.y + i as f32 * cell + cell / 2.0),
            Align2::RIGHT_CENTER,
            truncate(name),
            label_font.clone(),
            text_color,
        );
    }

    for i in 0..k {
        for j in 0..k {
            let value = matrix.get(i, j);
            let rect = cell_rect(origin, cell, i, j);
            painter.rect_filled(rect.shrink(0.5), 0.0, to_color32(correlation_color(value)));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{value:.2}"),
                value_font.clone(),
                to_color32(label_color(value)),
            );
        }
    }

    // ---- Colour scale legend ----
    let legend_x = origin.x + grid + 20.0;
    painter.text(
        Pos2::new(legend_x, origin.y),
        Align2::LEFT_TOP,
        "Scale",
        label_font,
        text_color,
    );
    for (idx, &v) in SCALE_STEPS.iter().enumerate() {
        let top = origin.y + 20.0 + idx as f32 * 20.0;
        let swatch = Rect::from_min_size(Pos2::new(legend_x, top), Vec2::splat(15.0));
        painter.rect_filled(swatch, 0.0, to_color32(correlation_color(v)));
        painter.text(
            Pos2::new(legend_x + 25.0, top + 7.5),
            Align2::LEFT_CENTER,
            format!("{v:.1}"),
            FontId::proportional(10.0),
            text_color,
        );
    }

    // ---- Hover tooltip with full names ----
    if let Some(pos) = response.hover_pos() {
        let rel = pos - origin;
        if rel.x >= 0.0 && rel.y >= 0.0 && rel.x < grid && rel.y < grid {
            let (i, j) = ((rel.y / cell) as usize, (rel.x / cell) as usize);
            let text = format!(
                "{} ↔ {}\nr = {:.4}",
                matrix.columns[i],
                matrix.columns[j],
                matrix.get(i, j)
            );
            response.on_hover_text_at_pointer(text);
        }
    }
}

fn cell_rect(origin: Pos2, cell: f32, row: usize, col: usize) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(col as f32 * cell, row as f32 * cell),
        Vec2::splat(cell),
    )
}

fn truncate(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let head: String = name.chars().take(MAX_LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

pub fn to_color32([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}
