//! Structured logging setup for processes hosting the coursework services.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the host binary, which calls [`init`] once at start-up.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

/// Installs a global `fmt` subscriber filtered by `filter`.
///
/// An unparsable directive falls back to `info`.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init(filter: &str) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}
