//! Shared query helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix-epoch timestamp in seconds.
pub fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Unix-epoch timestamp `days` days before now. Used by the staged
/// risk trajectory.
pub fn epoch_days_ago(days: i64) -> i64 {
    now_epoch() - days * 86_400
}
