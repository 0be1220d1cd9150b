use thiserror::Error;

/// Rejections raised while turning uploaded text into an analysable table.
///
/// Malformed rows and non-numeric cells are not errors; they are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The input has no header or no data line.
    #[error("CSV must have at least a header row and one data row ({0})")]
    Format(String),

    /// Fewer than two columns qualified as numeric.
    #[error(
        "CSV must have at least 2 numeric columns for correlation analysis (found {found})"
    )]
    InsufficientFeatures { found: usize },
}

impl DataError {
    pub(crate) fn insufficient_rows() -> Self {
        DataError::Format("insufficient rows".to_string())
    }
}
