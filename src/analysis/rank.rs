use std::cmp::Ordering;

/// 1-based ascending ranks of `values`.
///
/// Ties are not averaged: equal values get consecutive ranks in order of
/// their original position (the sort is stable).
pub fn competition_ranks(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    // -0.0 and 0.0 compare equal here, so they keep input order too.
    order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0; values.len()];
    for (sorted_pos, (original_idx, _)) in order.into_iter().enumerate() {
        ranks[original_idx] = sorted_pos + 1;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values() {
        assert_eq!(competition_ranks(&[30.0, 10.0, 20.0]), vec![3, 1, 2]);
    }

    #[test]
    fn test_ties_break_by_position() {
        assert_eq!(competition_ranks(&[5.0, 1.0, 5.0, 1.0]), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_signed_zero_is_a_tie() {
        assert_eq!(competition_ranks(&[0.0, -0.0]), vec![1, 2]);
    }

    #[test]
    fn test_empty() {
        assert!(competition_ranks(&[]).is_empty());
    }
}
