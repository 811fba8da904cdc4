//! Tracing initialisation for the sqci binary.
//!
//! Call [`init_logging`] once at program start, before configuration is
//! resolved, so the per-layer configuration lines are captured.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG` for fine-grained filtering and falls back to `level`
/// when it is unset or invalid. Only the first call takes effect.
pub fn init_logging(level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}
