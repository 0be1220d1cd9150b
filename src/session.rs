use std::sync::Arc;

use crate::analysis::{compute_correlation, CorrelationMatrix, CorrelationMethod};
use crate::data::error::DataError;
use crate::data::model::Dataset;
use crate::data::parse_and_classify;

// ---------------------------------------------------------------------------
// Session – one revision of (dataset, numeric columns, method, matrix)
// ---------------------------------------------------------------------------

/// Analysis state for one upload.
///
/// A session never changes after construction. An upload or a method switch
/// produces a new value with a higher revision; the dataset is shared
/// between revisions of the same upload.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    numeric_columns: Arc<[String]>,
    method: CorrelationMethod,
    matrix: CorrelationMatrix,
    revision: u64,
}

impl Session {
    /// Parse `raw`, classify its columns and correlate them with `method`.
    pub fn from_text(raw: &str, method: CorrelationMethod) -> Result<Self, DataError> {
        let table = parse_and_classify(raw)?;
        let matrix = compute_correlation(&table.dataset, &table.numeric_columns, method);
        Ok(Session {
            dataset: Arc::new(table.dataset),
            numeric_columns: table.numeric_columns.into(),
            method,
            matrix,
            revision: 0,
        })
    }

    /// Replace the data, keeping the current method.
    ///
    /// On failure `self` is untouched and stays usable.
    pub fn with_upload(&self, raw: &str) -> Result<Self, DataError> {
        let mut next = Session::from_text(raw, self.method)?;
        next.revision = self.revision + 1;
        Ok(next)
    }

    /// Same data, recomputed with `method`.
    pub fn with_method(&self, method: CorrelationMethod) -> Self {
        let matrix = compute_correlation(&self.dataset, &self.numeric_columns, method);
        Session {
            dataset: Arc::clone(&self.dataset),
            numeric_columns: Arc::clone(&self.numeric_columns),
            method,
            matrix,
            revision: self.revision + 1,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn method(&self) -> CorrelationMethod {
        self.method
    }

    pub fn matrix(&self) -> &CorrelationMatrix {
        &self.matrix
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
