//! Logging initialization

use tracing::Level;
use tracing_subscriber::fmt;

/// Install the stderr subscriber; library `log` records are bridged into it.
///
/// Logs are written to stderr so stdout remains clean for command output.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when commands run inside tests
    if subscriber.try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}
