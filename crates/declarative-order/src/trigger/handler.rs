//! Reload Handler
//!
//! Runs one full resolution per "declarations changed" request. Requests
//! are drained from a single channel by a single owner, so runs never
//! overlap.

use crate::application::service::OrderResolverService;
use crate::config::OrderingConfig;
use crate::domain::errors::{OrderingError, RegistryError};
use crate::ports::inbound::OrderResolverApi;
use crate::ports::outbound::{DeclarationSource, PriorityRegistry};
use crate::trigger::payloads::{ReloadRequest, ReloadResponse};
use order_telemetry::{metric_inc, PRIORITIES_APPLIED, RESOLUTIONS, UNRESOLVED_ITEMS};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns the resolver together with its declaration source and registry.
///
/// After every successful apply the registry is flushed, so a file-backed
/// registry is on disk before the response is returned. A failed flush is
/// reported as a failed reload with error kind `registry`.
pub struct ReloadHandler<S, R> {
    service: OrderResolverService,
    source: S,
    registry: R,
}

/// Why a reload did not complete.
#[derive(Debug)]
enum ReloadFailure {
    Ordering(OrderingError),
    Registry(RegistryError),
}

impl ReloadFailure {
    fn kind(&self) -> &'static str {
        match self {
            ReloadFailure::Ordering(err) => err.kind(),
            ReloadFailure::Registry(_) => "registry",
        }
    }
}

impl std::fmt::Display for ReloadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReloadFailure::Ordering(err) => err.fmt(f),
            ReloadFailure::Registry(err) => err.fmt(f),
        }
    }
}

impl<S, R> ReloadHandler<S, R>
where
    S: DeclarationSource,
    R: PriorityRegistry,
{
    /// Create a new handler with default config.
    pub fn new(source: S, registry: R) -> Self {
        Self::with_config(source, registry, OrderingConfig::default())
    }

    /// Create a new handler with custom config.
    pub fn with_config(source: S, registry: R, config: OrderingConfig) -> Self {
        Self {
            service: OrderResolverService::with_config(config),
            source,
            registry,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_parts(self) -> (S, R) {
        (self.source, self.registry)
    }

    /// Handle one reload request synchronously.
    ///
    /// Loads declarations, resolves, applies and flushes. A failure before
    /// the apply leaves the registry exactly as it was.
    pub fn handle_reload(&mut self, request: ReloadRequest) -> ReloadResponse {
        let start_time = Instant::now();

        info!(
            correlation_id = %request.correlation_id,
            reason = %request.reason,
            "Declarations changed, recomputing execution order"
        );

        let outcome = self
            .source
            .load_declarations()
            .map_err(OrderingError::from)
            .and_then(|declarations| {
                self.service
                    .resolve_and_apply(&declarations, &mut self.registry)
            })
            .map_err(ReloadFailure::Ordering);

        let outcome = outcome.and_then(|report| {
            self.registry
                .flush()
                .map(|()| report)
                .map_err(ReloadFailure::Registry)
        });

        match outcome {
            Ok(report) => {
                metric_inc!(RESOLUTIONS, &["success"]);
                PRIORITIES_APPLIED.inc_by(report.applied.len() as u64);
                UNRESOLVED_ITEMS.inc_by(report.warnings.len() as u64);

                info!(
                    correlation_id = %request.correlation_id,
                    applied = report.applied.len(),
                    unchanged = report.unchanged.len(),
                    unresolved = report.warnings.len(),
                    elapsed_us = start_time.elapsed().as_micros() as u64,
                    "Reload complete"
                );

                ReloadResponse {
                    correlation_id: request.correlation_id,
                    success: true,
                    applied: report.applied.len(),
                    unchanged: report.unchanged.len(),
                    unresolved: report
                        .unresolved()
                        .into_iter()
                        .map(|i| i.to_string())
                        .collect(),
                    error_kind: None,
                    error: None,
                }
            }
            Err(err) => {
                metric_inc!(RESOLUTIONS, &[err.kind()]);

                warn!(
                    correlation_id = %request.correlation_id,
                    kind = err.kind(),
                    error = %err,
                    "Reload aborted"
                );

                ReloadResponse {
                    correlation_id: request.correlation_id,
                    success: false,
                    error_kind: Some(err.kind().to_string()),
                    error: Some(err.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    /// Process requests one at a time until the channel closes.
    ///
    /// Responses are forwarded to `replies` when given. Returns the handler
    /// so the caller can inspect the final registry state.
    pub async fn run(
        mut self,
        mut requests: mpsc::Receiver<ReloadRequest>,
        replies: Option<mpsc::Sender<ReloadResponse>>,
    ) -> Self {
        while let Some(request) = requests.recv().await {
            let response = self.handle_reload(request);
            if let Some(replies) = &replies {
                if replies.send(response).await.is_err() {
                    warn!("Reload response receiver dropped");
                }
            }
        }

        info!("Reload channel closed, handler stopping");
        self
    }
}
