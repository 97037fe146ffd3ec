//! VigilErrorCode trait for boundary conversion.

/// Trait for converting Vigil errors to structured error codes.
/// Every error enum implements this to provide a stable code string
/// for the embedding boundary (HTTP layer, bindings, logs).
pub trait VigilErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the boundary.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const NO_ACTIVE_POLICY: &str = "NO_ACTIVE_POLICY";
pub const MODEL_NOT_FOUND: &str = "MODEL_NOT_FOUND";
pub const ALREADY_SIMULATED: &str = "ALREADY_SIMULATED";
pub const POLICY_CONFLICT: &str = "POLICY_CONFLICT";
pub const DEPLOYMENT_REJECTED: &str = "DEPLOYMENT_REJECTED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DRIFT_ERROR: &str = "DRIFT_ERROR";
pub const FAIRNESS_ERROR: &str = "FAIRNESS_ERROR";
pub const GOVERNANCE_ERROR: &str = "GOVERNANCE_ERROR";
