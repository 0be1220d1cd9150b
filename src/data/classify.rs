use super::error::DataError;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Numeric coverage of a single column
// ---------------------------------------------------------------------------

/// How many rows of a column converted to a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCoverage {
    pub numeric: usize,
    pub total: usize,
}

impl ColumnCoverage {
    /// Count successful conversions of `column` over every row.
    pub fn measure(dataset: &Dataset, column: &str) -> Self {
        let numeric = dataset
            .records()
            .iter()
            .filter(|record| record.number(column).is_some())
            .count();
        ColumnCoverage {
            numeric,
            total: dataset.len(),
        }
    }

    /// Share of numeric rows in `[0, 1]`; zero for an empty dataset.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.numeric as f64 / self.total as f64
        }
    }

    /// Strictly more than 80% of all rows are numeric.
    ///
    /// Compared as `numeric / total > 4 / 5` in integers so the 80% boundary
    /// is exact. An empty dataset never qualifies.
    pub fn is_numeric(&self) -> bool {
        self.numeric * 5 > self.total * 4
    }
}

// ---------------------------------------------------------------------------
// Column classifier
// ---------------------------------------------------------------------------

/// Coverage of every header column, in header order.
pub fn coverage_report(dataset: &Dataset) -> Vec<(String, ColumnCoverage)> {
    dataset
        .headers()
        .iter()
        .map(|name| (name.clone(), ColumnCoverage::measure(dataset, name)))
        .collect()
}

/// Names of the numeric columns in header order.
///
/// Fails with [`DataError::InsufficientFeatures`] when fewer than two columns
/// qualify, since a correlation needs at least a pair.
pub fn numeric_columns(dataset: &Dataset) -> Result<Vec<String>, DataError> {
    let columns: Vec<String> = dataset
        .headers()
        .iter()
        .filter(|name| ColumnCoverage::measure(dataset, name).is_numeric())
        .cloned()
        .collect();

    if columns.len() < 2 {
        return Err(DataError::InsufficientFeatures {
            found: columns.len(),
        });
    }
    Ok(columns)
}
