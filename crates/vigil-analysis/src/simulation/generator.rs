//! Deterministic synthetic data generation.
//!
//! A seeded LCG keeps runs reproducible without pulling in an RNG
//! crate. The baseline batch models healthy traffic; the shifted batch
//! moves every numeric distribution and skews approval rates by
//! gender, so drift and fairness detection both have real signal to
//! find.

use serde_json::json;
use vigil_core::types::FeatureMap;
use vigil_storage::queries::prediction_logs::NewPredictionLog;
use vigil_storage::queries::risk_history::NewRiskEntry;

use crate::risk::RiskBreakdown;

/// How the staged risk trajectory is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskProfile {
    /// Stage the computed breakdown as-is.
    #[default]
    Computed,
    /// Floor the final components at demonstration levels (drift 85,
    /// fairness 80) so the trajectory always ends in clearly elevated
    /// territory. Synthetic data only; live recomputation never takes
    /// this path.
    Escalation,
}

const ESCALATION_DRIFT_FLOOR: f64 = 85.0;
const ESCALATION_FAIRNESS_FLOOR: f64 = 80.0;

/// Seconds between consecutive synthetic logs.
const SAMPLE_SPACING_SECS: i64 = 3_600;

/// Deterministic generator: 64-bit LCG (Knuth's MMIX multiplier) with
/// the upper 53 bits feeding the float path.
#[derive(Debug, Clone)]
pub struct SyntheticRng {
    state: u64,
}

impl SyntheticRng {
    pub fn new(seed: u64) -> Self {
        // Avoid the all-zeros fixed point.
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal draw via Box-Muller.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }

    /// Pick from `options` with the given weights (assumed to sum to 1).
    fn weighted<'a>(&mut self, options: &[(&'a str, f64)]) -> &'a str {
        let roll = self.next_f64();
        let mut cumulative = 0.0;
        for &(option, weight) in options {
            cumulative += weight;
            if roll < cumulative {
                return option;
            }
        }
        options[options.len() - 1].0
    }
}

const BASELINE_COUNTRIES: &[(&str, f64)] = &[
    ("USA", 0.40),
    ("UK", 0.20),
    ("Germany", 0.15),
    ("France", 0.15),
    ("Japan", 0.10),
];
const SHIFTED_COUNTRIES: &[(&str, f64)] = &[
    ("USA", 0.95),
    ("UK", 0.02),
    ("Germany", 0.01),
    ("France", 0.01),
    ("Japan", 0.01),
];
const BASELINE_DEVICES: &[(&str, f64)] = &[("desktop", 0.50), ("mobile", 0.35), ("tablet", 0.15)];
const SHIFTED_DEVICES: &[(&str, f64)] = &[("mobile", 0.85), ("desktop", 0.10), ("tablet", 0.05)];

fn sample(
    model_id: i64,
    timestamp: i64,
    amount: f64,
    age: f64,
    gender: &str,
    country: &str,
    device: &str,
    prediction: f64,
) -> NewPredictionLog {
    let mut features = FeatureMap::new();
    features.insert("transaction_amount".into(), json!(amount));
    features.insert("customer_age".into(), json!(age));
    features.insert("gender".into(), json!(gender));
    features.insert("country".into(), json!(country));
    features.insert("device_type".into(), json!(device));
    NewPredictionLog {
        model_id,
        input_features: features,
        prediction: prediction.clamp(0.01, 0.99),
        actual_label: None,
        timestamp,
    }
}

/// Healthy traffic: moderate amounts, balanced demographics, and
/// near-identical score distributions across genders.
pub fn baseline_batch(
    rng: &mut SyntheticRng,
    model_id: i64,
    count: usize,
    start_timestamp: i64,
) -> Vec<NewPredictionLog> {
    (0..count)
        .map(|i| {
            let gender = if rng.next_f64() < 0.5 { "Male" } else { "Female" };
            sample(
                model_id,
                start_timestamp + i as i64 * SAMPLE_SPACING_SECS,
                rng.normal(200.0, 80.0).clamp(10.0, 800.0),
                rng.normal(40.0, 12.0).clamp(18.0, 80.0).round(),
                gender,
                rng.weighted(BASELINE_COUNTRIES),
                rng.weighted(BASELINE_DEVICES),
                rng.normal(0.30, 0.12),
            )
        })
        .collect()
}

/// Degraded traffic: amounts and ages shift hard, geography collapses
/// onto one country, and female scores move above the decision
/// threshold far more often than male scores.
pub fn shifted_batch(
    rng: &mut SyntheticRng,
    model_id: i64,
    count: usize,
    start_timestamp: i64,
) -> Vec<NewPredictionLog> {
    (0..count)
        .map(|i| {
            let gender = if rng.next_f64() < 0.5 { "Male" } else { "Female" };
            let score_mean = if gender == "Male" { 0.30 } else { 0.65 };
            sample(
                model_id,
                start_timestamp + i as i64 * SAMPLE_SPACING_SECS,
                rng.normal(900.0, 300.0).clamp(200.0, 2_000.0),
                rng.normal(55.0, 18.0).clamp(25.0, 90.0).round(),
                gender,
                rng.weighted(SHIFTED_COUNTRIES),
                rng.weighted(SHIFTED_DEVICES),
                rng.normal(score_mean, 0.12),
            )
        })
        .collect()
}

const STAGE_DRIFT_FRACTIONS: [f64; 4] = [0.50, 0.70, 0.85, 1.0];
const STAGE_FAIRNESS_FRACTIONS: [f64; 4] = [0.60, 0.75, 0.88, 1.0];

/// Back-dated risk entries ramping monotonically up to the final
/// breakdown, one per day offset in `days_ago`.
pub fn staged_trajectory(
    model_id: i64,
    final_breakdown: &RiskBreakdown,
    profile: RiskProfile,
    days_ago: &[i64],
    now: i64,
) -> Vec<NewRiskEntry> {
    let (final_drift, final_fairness) = match profile {
        RiskProfile::Computed => (
            final_breakdown.drift_component,
            final_breakdown.fairness_component,
        ),
        RiskProfile::Escalation => (
            final_breakdown.drift_component.max(ESCALATION_DRIFT_FLOOR),
            final_breakdown
                .fairness_component
                .max(ESCALATION_FAIRNESS_FLOOR),
        ),
    };

    days_ago
        .iter()
        .zip(STAGE_DRIFT_FRACTIONS.iter().zip(STAGE_FAIRNESS_FRACTIONS))
        .map(|(&days, (&drift_frac, fairness_frac))| {
            let drift_component = final_drift * drift_frac;
            let fairness_component = final_fairness * fairness_frac;
            NewRiskEntry {
                model_id,
                risk_score: (drift_component * vigil_core::constants::MRI_DRIFT_SHARE
                    + fairness_component * vigil_core::constants::MRI_FAIRNESS_SHARE)
                    .clamp(0.0, 100.0),
                drift_component,
                fairness_component,
                timestamp: now - days * 86_400,
            }
        })
        .collect()
}
