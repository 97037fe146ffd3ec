//! V001: model registry and prediction logs.

pub const MIGRATION_SQL: &str = r#"
-- Registered models and their governance/deployment state.
CREATE TABLE IF NOT EXISTS model_registry (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_name TEXT NOT NULL,
    version TEXT NOT NULL,
    description TEXT,
    training_accuracy REAL,
    status TEXT NOT NULL DEFAULT 'draft',
    deployment_status TEXT NOT NULL DEFAULT 'draft',
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_model_registry_name ON model_registry(model_name);

-- Append-only log of model inputs, outputs, and optional ground truth.
CREATE TABLE IF NOT EXISTS prediction_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_id INTEGER NOT NULL REFERENCES model_registry(id),
    input_features TEXT NOT NULL,
    prediction REAL NOT NULL,
    actual_label REAL,
    timestamp INTEGER NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_prediction_logs_model_ts
    ON prediction_logs(model_id, timestamp);
"#;
