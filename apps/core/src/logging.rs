//! Tracing subscriber setup.

use crate::config::DeskConfig;
use tracing_subscriber::EnvFilter;

/// Resolves the log filter: `RUST_LOG` first, then the configured level,
/// then plain `info` if the configured level does not parse.
pub fn resolve_filter(config: &DeskConfig) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: log level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                    config.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(config: &DeskConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(config))
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.log_json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    if let Err(e) = result {
        eprintln!("WARN: tracing subscriber already installed: {}", e);
    }
}
