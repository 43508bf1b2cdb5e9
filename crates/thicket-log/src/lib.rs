//! Logging setup for thicket binaries.
//!
//! Installs a `tracing` subscriber with console output and, optionally, a
//! JSON log file. Library crates log through the `log` facade; those records
//! reach the same subscriber through `tracing-subscriber`'s log bridge.

use std::fs::File;
use std::path::Path;

use thicket_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";
const LOG_FILE: &str = "thicket.log";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.debug.log_level`, which wins over the
/// default `info` filter. A JSON file layer is added when `log_dir` is given
/// and either `debug_build` or `config.debug.log_to_file` is set; failure to
/// create the file only loses the file layer.
///
/// # Examples
///
/// ```no_run
/// use thicket_config::Config;
/// use thicket_log::init_logging;
///
/// init_logging(None, false, Some(&Config::default()));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_file) = open_log_file(log_dir, debug_build, config) {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter used when `RUST_LOG` is unset.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// Create the log file when file logging is wanted and `log_dir` is usable.
fn open_log_file(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> Option<File> {
    let want_file = debug_build || config.is_some_and(|c| c.debug.log_to_file);
    let log_dir = log_dir.filter(|_| want_file)?;
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE)).ok()
}

fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}
