//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug` or
/// `l10n_build_stats=trace`.
pub const LOG_ENV: &str = "L10N_STATS_LOG";

/// Install the stderr subscriber. `L10N_STATS_LOG` wins over the verbosity
/// flag; without it the level is `info`, or `debug` when verbose.
///
/// Calling this twice is harmless: the second subscriber is ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
