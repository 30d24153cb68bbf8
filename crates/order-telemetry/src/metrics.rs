//! Prometheus metrics for order resolution.
//!
//! All metrics follow the naming convention: `order_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Resolutions by outcome (`success` or an error kind label)
    pub static ref RESOLUTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("order_resolutions_total", "Total order resolutions by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Registry entries written
    pub static ref PRIORITIES_APPLIED: IntCounter = IntCounter::new(
        "order_priorities_applied_total",
        "Total priorities written to the registry"
    ).expect("metric creation failed");

    /// Ordered items with no registry entry
    pub static ref UNRESOLVED_ITEMS: IntCounter = IntCounter::new(
        "order_unresolved_items_total",
        "Total ordered items the registry had no entry for"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling it more than once is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(RESOLUTIONS.clone()),
        Box::new(PRIORITIES_APPLIED.clone()),
        Box::new(UNRESOLVED_ITEMS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all registered metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
