//! Population Stability Index over fixed histogram bins.

use vigil_core::constants::{PSI_BIN_COUNT, PSI_FREQUENCY_FLOOR};

/// PSI between an expected (baseline) and actual (recent) sample.
///
/// Both samples are binned into `PSI_BIN_COUNT` equal-width bins over
/// their combined range. Per-bin frequency shares are floored at
/// `PSI_FREQUENCY_FLOOR` so empty bins cannot produce an infinite log
/// ratio. Returns 0.0 when either sample is empty or the combined
/// range is degenerate (all values identical).
pub fn population_stability_index(expected: &[f64], actual: &[f64]) -> f64 {
    if expected.is_empty() || actual.is_empty() {
        return 0.0;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in expected.iter().chain(actual.iter()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !(max > min) {
        return 0.0;
    }

    let expected_shares = bin_shares(expected, min, max);
    let actual_shares = bin_shares(actual, min, max);

    expected_shares
        .iter()
        .zip(actual_shares.iter())
        .map(|(&e, &a)| (a - e) * (a / e).ln())
        .sum()
}

fn bin_shares(values: &[f64], min: f64, max: f64) -> [f64; PSI_BIN_COUNT] {
    let width = (max - min) / PSI_BIN_COUNT as f64;
    let mut counts = [0usize; PSI_BIN_COUNT];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(PSI_BIN_COUNT - 1);
        counts[idx] += 1;
    }
    let total = values.len() as f64;
    let mut shares = [0.0; PSI_BIN_COUNT];
    for (share, &count) in shares.iter_mut().zip(counts.iter()) {
        *share = (count as f64 / total).max(PSI_FREQUENCY_FLOOR);
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_samples_score_near_zero() {
        let sample: Vec<f64> = (0..200).map(|i| i as f64).collect();
        let psi = population_stability_index(&sample, &sample);
        assert!(psi.abs() < 1e-9, "psi was {psi}");
    }

    #[test]
    fn shifted_samples_score_high() {
        let baseline: Vec<f64> = (0..200).map(|i| 100.0 + (i % 50) as f64).collect();
        let shifted: Vec<f64> = (0..200).map(|i| 800.0 + (i % 50) as f64).collect();
        let psi = population_stability_index(&baseline, &shifted);
        assert!(psi > 1.0, "disjoint distributions should blow past any threshold, got {psi}");
    }

    #[test]
    fn empty_or_constant_samples_are_zero() {
        assert_eq!(population_stability_index(&[], &[1.0]), 0.0);
        assert_eq!(population_stability_index(&[5.0; 30], &[5.0; 30]), 0.0);
    }
}
