//! Correlation engine behind the corr-studio viewer.
//!
//! Raw comma-separated text is parsed into a [`data::model::Dataset`], its
//! numeric columns are picked out, and a Pearson or Spearman
//! [`analysis::CorrelationMatrix`] is computed over them.
//!
//! ```
//! use corr_studio::analysis::{compute_correlation, CorrelationMethod};
//! use corr_studio::data::parse_and_classify;
//!
//! let table = parse_and_classify("x,y,name\n1,2,a\n2,4,b\n3,6,c").unwrap();
//! assert_eq!(table.numeric_columns, ["x", "y"]);
//!
//! let matrix = compute_correlation(&table.dataset, &table.numeric_columns, CorrelationMethod::Pearson);
//! assert_eq!(matrix.get(0, 1), 1.0);
//! ```

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod export;
pub mod session;

pub use session::Session;
