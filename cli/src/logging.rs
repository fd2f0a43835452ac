//! Diagnostic logging to stderr.
//!
//! The level comes from `--verbose`/`--quiet`; `RUST_LOG` directives are
//! applied on top so individual modules can be traced.

use std::io::Write;

use log::LevelFilter;

/// Log level selected by the command-line flags.
#[must_use]
pub const fn level_filter(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger.
///
/// Repeated calls are ignored.
pub fn init_logging(verbose: bool, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(verbose, quiet))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {}",
                record.level().as_str().to_ascii_lowercase(),
                record.args()
            )
        });
    if builder.try_init().is_err() {
        // A logger is already installed; keep it.
    }
}
