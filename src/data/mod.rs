/// Data layer: core types, parsing, and numeric column detection.
///
/// Architecture:
/// ```text
///   raw comma-separated text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  split lines/fields → Dataset (Header + Records)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  >80% finite numbers → numeric column names
///   └──────────┘
///        │
///        ▼
///   analysis::correlation
/// ```

pub mod classify;
pub mod error;
pub mod loader;
pub mod model;

use error::DataError;
use model::Dataset;

/// A parsed upload together with the columns eligible for correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub dataset: Dataset,
    /// Numeric column names, in header order.
    pub numeric_columns: Vec<String>,
}

impl ParsedTable {
    /// All header names, numeric or not.
    pub fn headers(&self) -> &[String] {
        self.dataset.headers()
    }
}

/// Parse raw text and pick out its numeric columns.
pub fn parse_and_classify(raw: &str) -> Result<ParsedTable, DataError> {
    let dataset = loader::parse_csv_text(raw)?;
    let numeric_columns = classify::numeric_columns(&dataset)?;
    Ok(ParsedTable {
        dataset,
        numeric_columns,
    })
}
