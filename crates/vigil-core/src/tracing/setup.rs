//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Vigil tracing/logging system.
///
/// Reads the `VIGIL_LOG` environment variable for per-subsystem log levels.
/// Format: `VIGIL_LOG=drift=debug,governance=info,storage=warn`
///
/// Falls back to `vigil=info` if `VIGIL_LOG` is not set or is invalid.
///
/// Events are emitted compact and single-line with their target module.
/// Thread ids and source locations are deliberately left off: Vigil runs
/// embedded behind a boundary layer, and the structured fields on each
/// event (model_id, risk_score, ...) already locate it.
///
/// Safe to call more than once; only the first call installs the
/// subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("VIGIL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("vigil=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().compact().with_target(true))
            .with(filter)
            .init();
    });
}
