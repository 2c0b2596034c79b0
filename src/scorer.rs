use std::collections::HashMap;

/// Scores a candidate track from its list of anchor-time deltas.
///
/// Computes the frequency histogram of `deltas` over the naturally indexed
/// range `min(deltas)..=max(deltas)`, treating unoccupied in-range bins as
/// count zero, and returns `max(count) - min(count)`. Empty input scores 0.
pub fn score(deltas: &[i64]) -> u64 {
    if deltas.is_empty() {
        return 0;
    }

    let min = *deltas.iter().min().unwrap();
    let max = *deltas.iter().max().unwrap();

    let mut counts: HashMap<i64, u64> = HashMap::new();
    for d in deltas {
        *counts.entry(*d).or_insert(0) += 1;
    }

    let width = (max - min) as u64 + 1;
    let mut max_count = 0u64;
    let mut min_count = u64::MAX;
    for i in 0..width {
        let c = *counts.get(&(min + i as i64)).unwrap_or(&0);
        max_count = max_count.max(c);
        min_count = min_count.min(c);
    }

    max_count - min_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(score(&[]), 0);
    }

    #[test]
    fn single_delta_scores_zero() {
        assert_eq!(score(&[42]), 0);
    }

    #[test]
    fn all_equal_deltas_score_zero() {
        assert_eq!(score(&[7, 7, 7, 7]), 0);
    }

    /// deltas = [5,5,5,7,9] -> histogram [3,0,1,0,1] -> score 3.
    #[test]
    fn literal_histogram_example() {
        assert_eq!(score(&[5, 5, 5, 7, 9]), 3);
    }

    #[test]
    fn adding_a_delta_at_the_mode_never_decreases_the_score() {
        let base = [5, 5, 5, 7, 9];
        let base_score = score(&base);
        let with_extra_mode: Vec<i64> = base.iter().copied().chain([5]).collect();
        assert!(score(&with_extra_mode) > base_score);
    }

    #[test]
    fn adding_a_distant_delta_does_not_decrease_the_score() {
        let base = [5, 5, 5, 7, 9];
        let base_score = score(&base);
        let with_distant: Vec<i64> = base.iter().copied().chain([1000]).collect();
        assert!(score(&with_distant) >= base_score);
    }
}
