//! Contamination Threshold
//!
//! The decision offset is the `contamination` percentile of the training
//! scores: roughly that share of the corpus falls on the outlier side.

/// Linear-interpolated percentile, `q` in [0, 100]
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Offset for a given contamination (share in (0, 0.5])
pub fn contamination_offset(training_scores: &[f64], contamination: f64) -> Option<f64> {
    percentile(training_scores, contamination * 100.0)
}
