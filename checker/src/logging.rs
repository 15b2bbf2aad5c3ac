//! Development-time tracing for debugging the checker.
//!
//! The verdict itself is not a log: the score line on stdout and the reason
//! line on stderr are written directly by the binaries and are unaffected by
//! `RUST_LOG`. Tracing output shares stderr and is silent below `warn` by
//! default, so graders reading a single diagnostic line see only that line.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=checker=debug checker input.txt - output.txt
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
