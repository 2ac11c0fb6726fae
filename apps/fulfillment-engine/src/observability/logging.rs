//! Structured logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false` if
/// a subscriber was already installed (e.g. by a test harness).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    let installed = if config.format == "pretty" {
        builder.pretty().try_init().is_ok()
    } else {
        builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::info!(
            level = %config.level,
            format = %config.format,
            "Logging initialized"
        );
    }
    installed
}
