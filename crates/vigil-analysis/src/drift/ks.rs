//! Two-sample Kolmogorov-Smirnov statistic.

/// Maximum vertical distance between the empirical CDFs of two samples.
///
/// Always in [0, 1]. Returns 0.0 when either sample is empty.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort_unstable_by(f64::total_cmp);
    b_sorted.sort_unstable_by(f64::total_cmp);

    let (na, nb) = (a_sorted.len() as f64, b_sorted.len() as f64);
    let (mut i, mut j) = (0usize, 0usize);
    let mut max_gap = 0.0f64;

    while i < a_sorted.len() && j < b_sorted.len() {
        let x = if a_sorted[i] <= b_sorted[j] {
            a_sorted[i]
        } else {
            b_sorted[j]
        };
        while i < a_sorted.len() && a_sorted[i] <= x {
            i += 1;
        }
        while j < b_sorted.len() && b_sorted[j] <= x {
            j += 1;
        }
        let gap = (i as f64 / na - j as f64 / nb).abs();
        max_gap = max_gap.max(gap);
    }
    max_gap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_samples_have_zero_gap() {
        let sample: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        assert!(ks_statistic(&sample, &sample).abs() < 1e-12);
    }

    #[test]
    fn disjoint_samples_reach_one() {
        let low: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let high: Vec<f64> = (0..50).map(|i| 1_000.0 + i as f64).collect();
        assert!((ks_statistic(&low, &high) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn statistic_stays_in_unit_interval() {
        let a = [1.0, 2.0, 2.0, 3.0, 8.0];
        let b = [2.0, 2.5, 3.0, 3.0, 4.0, 9.0];
        let d = ks_statistic(&a, &b);
        assert!((0.0..=1.0).contains(&d));
        assert!((d - ks_statistic(&b, &a)).abs() < 1e-12, "symmetric");
    }
}
