//! Diagnostic logging setup for the command-line binary

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::constants::logging::FILTER_ENV;

/// Filter used when the environment does not provide one
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "rag_deadlock=debug" } else { "warn" }
}

/// Install a stderr subscriber so log lines never mix with report output.
///
/// A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
