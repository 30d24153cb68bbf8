//! Order Resolver Service
//!
//! Main service implementing OrderResolverApi.

use crate::algorithms::{assign_priorities, build_dependency_graph, kahns_topological_sort};
use crate::config::OrderingConfig;
use crate::domain::entities::{ApplyReport, DependencyGraph, OrderResult, ScanOutcome};
use crate::domain::errors::{OrderingError, OrderingWarning};
use crate::domain::value_objects::{DeclarationSet, ItemId};
use crate::ports::inbound::OrderResolverApi;
use crate::ports::outbound::PriorityRegistry;

use tracing::{debug, error, info, warn};

/// Order Resolver Service
///
/// Orchestrates the resolution pipeline:
/// 1. Validate configuration
/// 2. Build dependency graph (structural checks)
/// 3. Check limits
/// 4. Execute Kahn's algorithm
/// 5. Assign priorities
pub struct OrderResolverService {
    config: OrderingConfig,
}

impl OrderResolverService {
    /// Create a new service with default config
    pub fn new() -> Self {
        Self {
            config: OrderingConfig::default(),
        }
    }

    /// Create a new service with custom config
    pub fn with_config(config: OrderingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    fn validate_limits(&self, scan: &ScanOutcome) -> Result<(), OrderingError> {
        let items = scan.item_count();
        if items > self.config.max_items {
            return Err(OrderingError::TooManyItems {
                count: items,
                max: self.config.max_items,
            });
        }

        let edges = scan.graph.edge_count();
        if edges > self.config.max_edges {
            return Err(OrderingError::TooManyEdges {
                count: edges,
                max: self.config.max_edges,
            });
        }

        Ok(())
    }

    fn report_failure(err: &OrderingError) {
        match err {
            OrderingError::CyclicDependency { unresolved } => {
                for edge in unresolved {
                    error!(
                        from = %edge.from,
                        to = %edge.to,
                        "Cannot update execution order due to circular dependency"
                    );
                }
            }
            other => error!(kind = other.kind(), "{}", other),
        }
    }
}

impl Default for OrderResolverService {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderResolverApi for OrderResolverService {
    fn build_dependency_graph(
        &self,
        declarations: &DeclarationSet,
    ) -> Result<ScanOutcome, OrderingError> {
        let scan = build_dependency_graph(declarations)?;
        self.validate_limits(&scan)?;
        Ok(scan)
    }

    fn sort(&self, graph: &DependencyGraph) -> Result<Vec<ItemId>, OrderingError> {
        kahns_topological_sort(graph)
    }

    fn resolve(&self, declarations: &DeclarationSet) -> Result<OrderResult, OrderingError> {
        self.config.validate()?;

        debug!(
            declared_items = declarations.len(),
            "Resolving execution order"
        );

        let result = self
            .build_dependency_graph(declarations)
            .and_then(|scan| {
                let ordered = self.sort(&scan.graph)?;
                Ok(assign_priorities(
                    &ordered,
                    scan.first.as_ref(),
                    scan.last.as_ref(),
                    self.config.step,
                ))
            })
            .inspect_err(Self::report_failure)?;

        info!(
            items = result.len(),
            step = result.step,
            "Execution order resolved"
        );

        Ok(result)
    }

    fn apply(&self, result: &OrderResult, registry: &mut dyn PriorityRegistry) -> ApplyReport {
        let mut report = ApplyReport::default();

        for entry in &result.entries {
            match registry.priority_of(&entry.item) {
                None => {
                    warn!(
                        item = %entry.item,
                        priority = entry.priority,
                        "Unable to set execution order: no registry entry matches this item"
                    );
                    report.warnings.push(OrderingWarning::UnresolvedItem {
                        item: entry.item.clone(),
                    });
                }
                Some(current) if current == entry.priority && self.config.skip_unchanged => {
                    report.unchanged.push(entry.item.clone());
                }
                Some(_) => {
                    registry.set_priority(&entry.item, entry.priority);
                    report.applied.push(entry.item.clone());
                }
            }
        }

        info!(
            applied = report.applied.len(),
            unchanged = report.unchanged.len(),
            unresolved = report.warnings.len(),
            "Execution order applied"
        );

        report
    }
}
