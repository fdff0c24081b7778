#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! host's call. With the `tracing-json` feature, [`init_json_logging`]
//! installs a JSON formatter filtered by `RUST_LOG` (default `warn`).

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
