//! # Order Telemetry
//!
//! Logging and metrics shared by the resolver library and the CLI.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use order_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `declarative-order` | Service name in logs |
//! | `ORDER_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `ORDER_JSON_LOGS` | `false` | JSON formatted output |
//! | `ORDER_CONSOLE_OUTPUT` | `true` | Write logs to the console |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    gather_metrics, register_metrics, PRIORITIES_APPLIED, REGISTRY, RESOLUTIONS,
    UNRESOLVED_ITEMS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first (synchronous)
    register_metrics()?;
    logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
