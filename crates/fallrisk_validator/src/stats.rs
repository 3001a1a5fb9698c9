//! Numeric helpers shared by the checks.

/// Computes quantiles by linear interpolation between closest ranks.
///
/// For `n` sorted values the quantile `q` sits at position `q * (n - 1)`;
/// fractional positions interpolate between the two neighbours. Returns
/// `None` for an empty input.
///
/// ```rust
/// use fallrisk_validator::quantiles;
///
/// let q = quantiles(&[4.0, 1.0, 3.0, 2.0], &[0.0, 0.5, 1.0]).unwrap();
/// assert_eq!(q, vec![1.0, 2.5, 4.0]);
/// ```
pub fn quantiles(values: &[f64], levels: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(levels.iter().map(|&q| interpolate(&sorted, q)).collect())
}

fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Whether `actual` equals `expected` within a relative or absolute
/// tolerance, whichever is larger.
pub fn approx_eq(actual: f64, expected: f64, rel: f64, abs: f64) -> bool {
    if actual == expected {
        return true;
    }
    let tolerance = (rel * expected.abs()).max(abs);
    (actual - expected).abs() <= tolerance
}

/// Returns the smallest and largest value, or `None` when empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
