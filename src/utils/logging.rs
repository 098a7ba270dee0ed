// logging.rs
//
// Observational logging for the CLI host (SPEC_FULL §5). The engine itself
// only ever calls `log::trace!`/`log::debug!`; this module wires those
// events to `env_logger` the way the corpus's simulators do, filtered from
// `RUST_LOG` with a `--log-level` flag as a fallback default.

use log::LevelFilter;

/// Initializes `env_logger` for the CLI binary. `RUST_LOG`, if set, always
/// wins; `--log-level` only supplies the default when it is absent, which
/// mirrors `env_logger`'s own `Builder::filter_level` + `parse_default_env`
/// precedence.
pub fn init(default_level: &str) {
    let level = parse_level(default_level);
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}
