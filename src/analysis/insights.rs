use serde::{Deserialize, Serialize};

use super::correlation::CorrelationMatrix;

/// Cut-offs used to flag notable pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// A pair above this is reported as a strong positive correlation.
    pub strong_positive: f64,
    /// A pair below this is reported as a strong negative correlation.
    pub strong_negative: f64,
    /// |r| above this (but r != 1) raises a multicollinearity alert.
    pub multicollinearity: f64,
    /// How many multicollinear pairs the viewer lists.
    pub max_alerts: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            strong_positive: 0.8,
            strong_negative: -0.5,
            multicollinearity: 0.9,
            max_alerts: 3,
        }
    }
}

/// Two distinct columns and their correlation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub first: String,
    pub second: String,
    pub value: f64,
}

/// Headline findings for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub strongest_positive: Option<CorrelationPair>,
    pub strongest_negative: Option<CorrelationPair>,
    /// Highly correlated pairs, strongest first.
    pub multicollinear: Vec<CorrelationPair>,
    pub feature_count: usize,
    pub pair_count: usize,
    pub mean_abs: f64,
    pub max_abs: f64,
}

impl Insights {
    /// The multicollinear pairs the viewer should show.
    pub fn alerts<'a>(&'a self, thresholds: &InsightThresholds) -> &'a [CorrelationPair] {
        let n = self.multicollinear.len().min(thresholds.max_alerts);
        &self.multicollinear[..n]
    }
}

/// Upper-triangle pairs sorted by descending |r|; equal magnitudes keep
/// matrix order.
pub fn ranked_pairs(matrix: &CorrelationMatrix) -> Vec<CorrelationPair> {
    let mut pairs: Vec<CorrelationPair> = matrix
        .upper_triangle()
        .map(|(i, j, value)| CorrelationPair {
            first: matrix.columns[i].clone(),
            second: matrix.columns[j].clone(),
            value,
        })
        .collect();
    pairs.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
    pairs
}

pub fn summarize(matrix: &CorrelationMatrix, thresholds: &InsightThresholds) -> Insights {
    let pairs = ranked_pairs(matrix);

    let strongest_positive = pairs
        .iter()
        .find(|p| p.value > thresholds.strong_positive)
        .cloned();
    let strongest_negative = pairs
        .iter()
        .find(|p| p.value < thresholds.strong_negative)
        .cloned();
    // Exactly 1 usually means a duplicated column, which is not news.
    let multicollinear = pairs
        .iter()
        .filter(|p| p.value.abs() > thresholds.multicollinearity && p.value != 1.0)
        .cloned()
        .collect();

    let (mean_abs, max_abs) = if pairs.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = pairs.iter().map(|p| p.value.abs()).sum();
        let max = pairs.iter().map(|p| p.value.abs()).fold(0.0, f64::max);
        (sum / pairs.len() as f64, max)
    };

    Insights {
        strongest_positive,
        strongest_negative,
        multicollinear,
        feature_count: matrix.size(),
        pair_count: pairs.len(),
        mean_abs,
        max_abs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::correlation::CorrelationMethod;

    fn matrix(columns: &[&str], values: Vec<Vec<f64>>) -> CorrelationMatrix {
        CorrelationMatrix {
            method: CorrelationMethod::Pearson,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            values,
        }
    }

    #[test]
    fn test_summary_of_mixed_matrix() {
        let m = matrix(
            &["a", "b", "c", "d"],
            vec![
                vec![1.0, 0.95, -0.6, 0.1],
                vec![0.95, 1.0, -0.92, 0.85],
                vec![-0.6, -0.92, 1.0, 0.0],
                vec![0.1, 0.85, 0.0, 1.0],
            ],
        );
        let insights = summarize(&m, &InsightThresholds::default());

        let pos = insights.strongest_positive.unwrap();
        assert_eq!((pos.first.as_str(), pos.second.as_str()), ("a", "b"));
        assert_eq!(pos.value, 0.95);

        let neg = insights.strongest_negative.unwrap();
        assert_eq!((neg.first.as_str(), neg.second.as_str()), ("b", "c"));

        let flagged: Vec<f64> = insights.multicollinear.iter().map(|p| p.value).collect();
        assert_eq!(flagged, vec![0.95, -0.92]);

        assert_eq!(insights.feature_count, 4);
        assert_eq!(insights.pair_count, 6);
        assert!((insights.mean_abs - 3.42 / 6.0).abs() < 1e-12);
        assert_eq!(insights.max_abs, 0.95);
    }

    #[test]
    fn test_nothing_notable() {
        let m = matrix(&["a", "b"], vec![vec![1.0, 0.3], vec![0.3, 1.0]]);
        let insights = summarize(&m, &InsightThresholds::default());
        assert!(insights.strongest_positive.is_none());
        assert!(insights.strongest_negative.is_none());
        assert!(insights.multicollinear.is_empty());
    }

    #[test]
    fn test_perfect_pairs_are_not_multicollinear() {
        let m = matrix(&["a", "b"], vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let insights = summarize(&m, &InsightThresholds::default());
        assert!(insights.multicollinear.is_empty());
        assert!(insights.strongest_positive.is_some());
    }

    #[test]
    fn test_alerts_are_capped() {
        let m = matrix(
            &["a", "b", "c"],
            vec![
                vec![1.0, 0.91, 0.93],
                vec![0.91, 1.0, 0.99],
                vec![0.93, 0.99, 1.0],
            ],
        );
        let thresholds = InsightThresholds {
            max_alerts: 2,
            ..Default::default()
        };
        let insights = summarize(&m, &thresholds);
        assert_eq!(insights.multicollinear.len(), 3);
        let shown: Vec<f64> = insights.alerts(&thresholds).iter().map(|p| p.value).collect();
        assert_eq!(shown, vec![0.99, 0.93]);
    }

    #[test]
    fn test_empty_matrix() {
        let m = matrix(&[], Vec::new());
        let insights = summarize(&m, &InsightThresholds::default());
        assert_eq!(insights.pair_count, 0);
        assert_eq!(insights.mean_abs, 0.0);
    }
}
