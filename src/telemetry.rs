//! Telemetry logic.
//! Support logging and metrics descriptions.

use metrics::Unit;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, Logging};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(config: &Logging) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let layer = match config.format {
        LogFormat::Console => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
}

/// Describe metrics recorded while building users.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "lmnuser_records_built_total",
        Unit::Count,
        "Users built from directory attributes."
    );
    metrics::describe_counter!(
        "lmnuser_permission_decode_failures_total",
        Unit::Count,
        "Permission entries rejected because of a missing separator."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_once() {
        let config = Logging::default();
        describe_metrics();

        let _ = setup_logging(&config);
        assert!(setup_logging(&config).is_err());
    }
}
