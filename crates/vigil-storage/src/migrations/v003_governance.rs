//! V003: governance policies and the audit log.

pub const MIGRATION_SQL: &str = r#"
-- Governance thresholds. The partial unique index enforces the
-- single-active-policy invariant at the persistence layer.
CREATE TABLE IF NOT EXISTS governance_policies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    max_allowed_mri REAL NOT NULL,
    max_allowed_disparity REAL NOT NULL,
    approval_required_above_mri REAL NOT NULL,
    active INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE UNIQUE INDEX IF NOT EXISTS idx_policies_single_active
    ON governance_policies(active) WHERE active = 1;

-- Best-effort audit trail for governance and deployment actions.
CREATE TABLE IF NOT EXISTS audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_id INTEGER REFERENCES model_registry(id),
    action TEXT NOT NULL,
    action_status TEXT NOT NULL,
    risk_score REAL,
    disparity_score REAL,
    governance_status TEXT,
    deployment_status TEXT,
    override_used INTEGER,
    details TEXT,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_audit_log_model ON audit_log(model_id);
CREATE INDEX IF NOT EXISTS idx_audit_log_action ON audit_log(action);
"#;
