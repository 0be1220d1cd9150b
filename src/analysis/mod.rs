/// Correlation engine and the summaries built on top of it.
///
/// ```text
///   Dataset + numeric columns
///        │
///        ▼
///   ┌─────────────┐   spearman   ┌──────┐
///   │ correlation  │ ───────────▶ │ rank │
///   └─────────────┘              └──────┘
///        │
///        ▼
///   CorrelationMatrix ──▶ insights
/// ```

pub mod correlation;
pub mod insights;
pub mod rank;

pub use correlation::{compute_correlation, CorrelationMatrix, CorrelationMethod};
