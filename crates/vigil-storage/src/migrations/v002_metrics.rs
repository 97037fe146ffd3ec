//! V002: metric tables (drift_metrics, fairness_metrics, risk_history).
//!
//! All three are append-only histories; "latest by timestamp" is the
//! read convention. Superseding evaluations insert new rows.

pub const MIGRATION_SQL: &str = r#"
-- One row per monitored feature per drift evaluation run.
CREATE TABLE IF NOT EXISTS drift_metrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_id INTEGER NOT NULL REFERENCES model_registry(id),
    feature_name TEXT NOT NULL,
    psi_value REAL NOT NULL,
    ks_statistic REAL NOT NULL,
    drift_flag INTEGER NOT NULL DEFAULT 0,
    timestamp INTEGER NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_drift_metrics_model_ts
    ON drift_metrics(model_id, timestamp);

-- One row per group per fairness evaluation; disparity_score is a
-- property of the evaluation and repeats on each of its rows.
CREATE TABLE IF NOT EXISTS fairness_metrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_id INTEGER NOT NULL REFERENCES model_registry(id),
    protected_attribute TEXT NOT NULL,
    group_name TEXT NOT NULL,
    total_predictions INTEGER NOT NULL DEFAULT 0,
    positive_predictions INTEGER NOT NULL DEFAULT 0,
    approval_rate REAL NOT NULL DEFAULT 0.0,
    disparity_score REAL NOT NULL DEFAULT 0.0,
    fairness_flag INTEGER NOT NULL DEFAULT 0,
    timestamp INTEGER NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_fairness_metrics_model_ts
    ON fairness_metrics(model_id, timestamp);

-- Composed Model Risk Index audit trail.
CREATE TABLE IF NOT EXISTS risk_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_id INTEGER NOT NULL REFERENCES model_registry(id),
    risk_score REAL NOT NULL,
    drift_component REAL NOT NULL,
    fairness_component REAL NOT NULL DEFAULT 0.0,
    timestamp INTEGER NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_risk_history_model_ts
    ON risk_history(model_id, timestamp);
"#;
