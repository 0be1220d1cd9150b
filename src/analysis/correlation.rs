use std::fmt;

use serde::{Deserialize, Serialize};

use super::rank::competition_ranks;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// CorrelationMethod
// ---------------------------------------------------------------------------

/// Which statistic fills the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Linear product-moment correlation.
    #[default]
    Pearson,
    /// Pearson correlation of the rank-transformed series.
    Spearman,
}

impl CorrelationMethod {
    pub const ALL: [CorrelationMethod; 2] = [CorrelationMethod::Pearson, CorrelationMethod::Spearman];

    /// Lowercase identifier, used in file names.
    pub fn id(self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
        }
    }

    /// Correlation of two series truncated to their common length.
    pub fn correlate(self, x: &[f64], y: &[f64]) -> f64 {
        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => spearman(x, y),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationMethod::Pearson => write!(f, "Pearson"),
            CorrelationMethod::Spearman => write!(f, "Spearman"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pairwise statistics
// ---------------------------------------------------------------------------

/// Pearson's r over the first `min(x.len(), y.len())` elements.
///
/// Uses the raw-sums form
/// `(nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`.
/// No points, a constant series, or a zero denominator yields 0.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    // Raw sums of a constant 0.7 series do not cancel to exactly 0.
    if is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
        sum_y2 += yi * yi;
    }

    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        return 0.0;
    }
    // Rounding can push a variance term below zero (NaN) or |r| past 1.
    let r = numerator / denominator;
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Spearman's rho: Pearson's r of the competition ranks of both series.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let x_ranks = as_f64(&competition_ranks(&x[..n]));
    let y_ranks = as_f64(&competition_ranks(&y[..n]));
    pearson(&x_ranks, &y_ranks)
}

fn as_f64(ranks: &[usize]) -> Vec<f64> {
    ranks.iter().map(|&r| r as f64).collect()
}

// ---------------------------------------------------------------------------
// CorrelationMatrix
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of pairwise correlations.
///
/// Row/column `i` corresponds to `columns[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub method: CorrelationMethod,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Entries above the diagonal as `(i, j, value)` with `i < j`.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size())
            .flat_map(move |i| ((i + 1)..self.size()).map(move |j| (i, j, self.values[i][j])))
    }
}

/// Correlate every pair of `columns` in `dataset`.
///
/// Each column's values are filtered to its own numeric cells before
/// pairing; the two series are then truncated to the shorter length. No
/// row alignment happens, so gaps in different rows shift one series
/// against the other. The diagonal is exactly 1.
pub fn compute_correlation(
    dataset: &Dataset,
    columns: &[String],
    method: CorrelationMethod,
) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|column| dataset.numeric_values(column))
        .collect();

    let k = columns.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
        for j in (i + 1)..k {
            // Both statistics are symmetric in their arguments.
            let r = method.correlate(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    log::debug!("computed {k}x{k} {method} matrix over {} rows", dataset.len());

    CorrelationMatrix {
        method,
        columns: columns.to_vec(),
        values,
    }
}
