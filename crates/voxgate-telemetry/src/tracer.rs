//! Subscriber setup

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use voxgate_core::{LogFormat, LoggingConfig};

/// Filter directives: `RUST_LOG` when set, else the configured level.
pub fn filter_directives(config: &LoggingConfig, rust_log: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.level.clone())
}

/// Initialize the global tracing subscriber.
///
/// Output is human readable text or one JSON object per line, per
/// `config.format`. Calling this more than once keeps the first subscriber.
///
/// # Example
///
/// ```rust,no_run
/// use voxgate_core::LoggingConfig;
/// use voxgate_telemetry::init_tracing;
///
/// init_tracing(&LoggingConfig::default());
/// ```
pub fn init_tracing(config: &LoggingConfig) {
    let directives = filter_directives(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_line_number(true),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}
