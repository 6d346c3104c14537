//! Log setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a `RUST_LOG`-filtered subscriber (default `info`) that writes to
/// standard error, keeping standard output for CSV.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
