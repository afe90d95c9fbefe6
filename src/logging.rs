//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout stays reserved for command output.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map the number of `-v` flags to a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives are applied on top of the verbosity level. Calling
/// this more than once is harmless; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter =
        EnvFilter::from_default_env().add_directive(level_for_verbosity(verbosity).into());

    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false).without_time();

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
