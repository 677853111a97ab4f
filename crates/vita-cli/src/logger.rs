//! Logging setup
//!
//! Logs go to stderr so `--json` output on stdout stays machine readable.
//! `RUST_LOG` takes precedence; otherwise the level is `warn`, or `debug`
//! with `--verbose`.

use log::LevelFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp_millis();

    // A logger may already be installed when running under a test harness
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
