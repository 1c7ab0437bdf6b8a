// ABOUTME: Shared logging setup for keyline binaries
// ABOUTME: init() logs to stderr so converted keys on stdout stay clean

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level used when RUST_LOG doesn't say otherwise.
fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Standard logging to stderr. Default: WARN, or DEBUG when `verbose`.
/// RUST_LOG directives are applied on top.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level(verbose).into()),
        )
        .init();
}
