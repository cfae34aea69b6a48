//! Proportional and equal splitting of an amount

/// Split `total` evenly across `count` recipients
pub fn equal_split(total: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![total / count as f64; count]
}

/// Split `total` in proportion to `weights`
///
/// Returns `None` when the weights sum to zero or less, leaving the
/// fallback policy to the caller.
pub fn proportional_split(total: f64, weights: &[f64]) -> Option<Vec<f64>> {
    let total_weight: f64 = weights.iter().sum();
    if total_weight > 0.0 {
        Some(weights.iter().map(|w| w / total_weight * total).collect())
    } else {
        None
    }
}

/// Percentage of `part` in `whole`, 0 when `whole` is not positive
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
