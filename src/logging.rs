//! Log filter setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when set and valid, otherwise `default`
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
