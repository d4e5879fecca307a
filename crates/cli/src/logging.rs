//! Subscriber setup. Events go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. An explicit `--log-level` wins, then
/// `RUST_LOG`, then the config file's `[logging] level`, then `warn`.
pub fn init(cli_level: Option<&str>, config_level: Option<&str>) -> Result<(), String> {
    let filter = match cli_level {
        Some(level) => parse_filter(level)?,
        None => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => parse_filter(config_level.unwrap_or(DEFAULT_LEVEL))?,
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn parse_filter(directive: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(directive)
        .map_err(|e| format!("invalid log level '{}': {}", directive, e))
}
