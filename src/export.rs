use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{ImageFormat, Rgb, RgbImage};

use crate::analysis::CorrelationMatrix;
use crate::color::correlation_color;
use crate::config::ExportConfig;

/// Output flavours offered by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// e.g. `correlation-heatmap-spearman.png`
    pub fn default_file_name(self, matrix: &CorrelationMatrix) -> String {
        let stem = match self {
            ExportFormat::Png => "correlation-heatmap",
            ExportFormat::Csv | ExportFormat::Json => "correlation-matrix",
        };
        format!("{stem}-{}.{}", matrix.method.id(), self.extension())
    }
}

/// Write `matrix` to `path` in the given format.
pub fn save(
    matrix: &CorrelationMatrix,
    path: &Path,
    format: ExportFormat,
    config: &ExportConfig,
) -> Result<()> {
    match format {
        ExportFormat::Png => render_heatmap(matrix, config.cell_size)?
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("writing PNG {}", path.display())),
        ExportFormat::Csv => {
            let file = create(path)?;
            write_matrix_csv(matrix, file)
        }
        ExportFormat::Json => {
            let mut file = BufWriter::new(create(path)?);
            write_matrix_json(matrix, &mut file)?;
            file.flush().context("flushing JSON export")
        }
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tabular exports
// ---------------------------------------------------------------------------

/// Matrix as CSV: an empty corner cell and the column names, then one row
/// per column starting with its name.
pub fn write_matrix_csv<W: Write>(matrix: &CorrelationMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(std::iter::once("").chain(matrix.columns.iter().map(String::as_str)))
        .context("writing CSV header")?;

    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let record = std::iter::once(name.clone()).chain(row.iter().map(|v| v.to_string()));
        wtr.write_record(record)
            .with_context(|| format!("writing CSV row {name}"))?;
    }
    wtr.flush().context("flushing CSV export")?;
    Ok(())
}

pub fn write_matrix_json<W: Write>(matrix: &CorrelationMatrix, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, matrix).context("serializing matrix")
}

// ---------------------------------------------------------------------------
// Heatmap raster
// ---------------------------------------------------------------------------

/// Largest PNG edge the exporter will allocate.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Rasterise the matrix as square cells separated by a 1-pixel white gutter.
///
/// Fails when `cell_size` times the column count exceeds [`MAX_IMAGE_SIDE`].
pub fn render_heatmap(matrix: &CorrelationMatrix, cell_size: u32) -> Result<RgbImage> {
    let cell_size = cell_size.max(2);
    let side = match u32::try_from(matrix.size())
        .ok()
        .and_then(|k| cell_size.checked_mul(k))
    {
        Some(side) if side <= MAX_IMAGE_SIDE => side,
        _ => bail!(
            "heatmap of {} columns at cell size {cell_size} exceeds {MAX_IMAGE_SIDE} pixels",
            matrix.size()
        ),
    };
    let mut img = RgbImage::from_pixel(side.max(1), side.max(1), Rgb([255, 255, 255]));

    for i in 0..matrix.size() {
        for j in 0..matrix.size() {
            let fill = Rgb(correlation_color(matrix.get(i, j)));
            let (x0, y0) = (j as u32 * cell_size, i as u32 * cell_size);
            for y in y0..y0 + cell_size - 1 {
                for x in x0..x0 + cell_size - 1 {
                    img.put_pixel(x, y, fill);
                }
            }
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CorrelationMethod;
    use tempfile::TempDir;

    fn sample() -> CorrelationMatrix {
        CorrelationMatrix {
            method: CorrelationMethod::Spearman,
            columns: vec!["height".into(), "weight".into()],
            values: vec![vec![1.0, -0.25], vec![-0.25, 1.0]],
        }
    }

    #[test]
    fn test_csv_layout() {
        let mut out = Vec::new();
        write_matrix_csv(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ",height,weight\nheight,1,-0.25\nweight,-0.25,1\n");
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let mut out = Vec::new();
        write_matrix_json(&sample(), &mut out).unwrap();
        let back: CorrelationMatrix = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, sample());
        assert!(String::from_utf8(out).unwrap().contains("\"spearman\""));
    }

    #[test]
    fn test_heatmap_raster() {
        let img = render_heatmap(&sample(), 10).unwrap();
        assert_eq!(img.dimensions(), (20, 20));
        assert_eq!(img.get_pixel(0, 0).0, correlation_color(1.0));
        assert_eq!(img.get_pixel(15, 2).0, correlation_color(-0.25));
        // gutter
        assert_eq!(img.get_pixel(9, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_default_file_names() {
        let m = sample();
        assert_eq!(
            ExportFormat::Png.default_file_name(&m),
            "correlation-heatmap-spearman.png"
        );
        assert_eq!(
            ExportFormat::Csv.default_file_name(&m),
            "correlation-matrix-spearman.csv"
        );
    }

    #[test]
    fn test_save_all_formats() {
        let dir = TempDir::new().unwrap();
        let config = ExportConfig::default();
        for format in [ExportFormat::Png, ExportFormat::Csv, ExportFormat::Json] {
            let path = dir.path().join(format.default_file_name(&sample()));
            save(&sample(), &path, format, &config).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_oversized_cell_size_is_rejected() {
        assert!(render_heatmap(&sample(), 2_000_000_000).is_err());
        assert!(render_heatmap(&sample(), u32::MAX).is_err());
        assert!(render_heatmap(&sample(), MAX_IMAGE_SIDE / 2).is_ok());
        assert!(render_heatmap(&sample(), MAX_IMAGE_SIDE / 2 + 1).is_err());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.png");
        let config = ExportConfig {
            cell_size: 2_000_000_000,
        };
        let err = save(&sample(), &path, ExportFormat::Png, &config).unwrap_err();
        assert!(err.to_string().contains("exceeds"), "{err}");
        assert!(!path.exists());
    }
}
