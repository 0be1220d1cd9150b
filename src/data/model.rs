use std::collections::BTreeMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// CellValue – a single field of a parsed row
// ---------------------------------------------------------------------------

/// A parsed field: either a finite number or the raw text token.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// The field was present but empty after trimming and quote stripping.
    Empty,
}

impl CellValue {
    /// Classify a cleaned token.
    ///
    /// Only tokens that parse as a *finite* `f64` become numbers, so `inf`,
    /// `NaN` and friends stay text.
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() {
            return CellValue::Empty;
        }
        match parse_finite(token) {
            Some(v) => CellValue::Number(v),
            None => CellValue::Text(token.to_string()),
        }
    }

    /// The numeric value, if this cell converted successfully.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Header – ordered column names with a name → position index
// ---------------------------------------------------------------------------

/// Ordered column names of a dataset.
///
/// When a name occurs more than once, lookups resolve to its last
/// occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    names: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(pos, name)| (name.clone(), pos))
            .collect();
        Header { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

// ---------------------------------------------------------------------------
// Record – one accepted row
// ---------------------------------------------------------------------------

/// One data row keyed by the dataset header. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<CellValue>,
}

impl Record {
    /// Returns `None` unless there is exactly one value per header column.
    pub fn new(header: Arc<Header>, values: Vec<CellValue>) -> Option<Self> {
        if values.len() != header.len() {
            return None;
        }
        Some(Record { header, values })
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.header.position(column).map(|pos| &self.values[pos])
    }

    /// Numeric value of the named column, if it converted.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.header
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

// ---------------------------------------------------------------------------
// Dataset – all accepted rows sharing one header
// ---------------------------------------------------------------------------

/// The parsed table. Every record shares the same [`Header`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    header: Arc<Header>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(header: Arc<Header>, records: Vec<Record>) -> Self {
        debug_assert!(records.iter().all(|r| Arc::ptr_eq(&r.header, &header)));
        Dataset { header, records }
    }

    /// Column names in header order.
    pub fn headers(&self) -> &[String] {
        self.header.names()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Successfully converted values of `column`, in row order.
    ///
    /// Rows whose value did not convert are skipped, not replaced.
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|record| record.number(column))
            .collect()
    }
}
