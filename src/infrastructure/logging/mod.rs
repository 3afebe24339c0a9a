//! Logging infrastructure with optional rolling file output.

use crate::infrastructure::config::{paths, LoggingConfig};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the console filter: `RUST_LOG` if set, otherwise the configured level
fn console_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize logging with console and optional file output.
///
/// With `production` set, logs are also written to `<config dir>/logs/groups-service.log`,
/// rotated daily.
pub fn setup(config: &LoggingConfig) {
    // Console layer (always enabled)
    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(console_filter(config));

    let file_layer = if config.production {
        let log_dir = paths::log_dir();

        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
            None
        } else {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, &log_dir, "groups-service.log");

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_filter(EnvFilter::new("info")),
            )
        }
    } else {
        None
    };

    // try_init: a second call (e.g. from tests) keeps the first subscriber
    let result = match file_layer {
        Some(file_layer) => tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init(),
        None => tracing_subscriber::registry().with(console_layer).try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
        return;
    }

    if config.production {
        tracing::info!("File logging enabled: {:?}", paths::log_dir());
    }
    tracing::info!("Logging initialized (level={}, production={})", config.level, config.production);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_twice_is_harmless() {
        let config = LoggingConfig::default();
        setup(&config);
        setup(&config);
    }
}
