//! Tracing bootstrap for binaries and test harnesses embedding the engine.
//!
//! Library code only emits events; installing a subscriber is left to the
//! host process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "layerdrift_core=info,layerdrift_analysis=info";

/// Install a global fmt subscriber filtered by `RUST_LOG`, or by
/// `default_directive` when the variable is absent or invalid.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
