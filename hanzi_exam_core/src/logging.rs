//! Tracing subscriber setup for hosts that do not install their own

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "hanzi_exam_core=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `hanzi_exam_core=info`. Safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
