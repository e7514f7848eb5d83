//! Tracing setup for the `item-pager` binary.
//!
//! Logs go to stderr so that `--json` output on stdout can be piped. A bare
//! level such as `debug` only raises this crate's verbosity; the HTTP stack
//! stays at `warn` unless a full directive is given.

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Turns a `--log-level` value into an `EnvFilter` directive.
///
/// Plain level names are scoped to this crate. Anything else (for example
/// `item_pager=trace,reqwest=debug`) is used as written.
pub fn filter_directive(level: &str) -> String {
    let level = level.trim();
    let lowered = level.to_ascii_lowercase();
    if LEVELS.contains(&lowered.as_str()) {
        format!("warn,item_pager={lowered}")
    } else {
        level.to_string()
    }
}

/// Installs the global subscriber. `RUST_LOG`, when set and valid, wins over
/// `level`.
///
/// # Errors
///
/// Fails if `level` is not a valid filter directive.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(level))
            .with_context(|| format!("Invalid log level '{level}'"))?,
    };

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
