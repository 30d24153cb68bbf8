//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{ApplyReport, DependencyGraph, OrderResult, ScanOutcome};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{DeclarationSet, ItemId};
use crate::ports::outbound::PriorityRegistry;

/// Primary order resolution API.
///
/// Every call is synchronous and self-contained: a fresh graph is built
/// for each resolution and discarded afterwards.
pub trait OrderResolverApi: Send + Sync {
    /// Scan declarations into a dependency graph.
    ///
    /// Performs all structural checks (marker conflicts, limits).
    fn build_dependency_graph(
        &self,
        declarations: &DeclarationSet,
    ) -> Result<ScanOutcome, OrderingError>;

    /// Topologically sort a graph.
    fn sort(&self, graph: &DependencyGraph) -> Result<Vec<ItemId>, OrderingError>;

    /// Compute priorities for a declaration set.
    ///
    /// This is the main entry point. It:
    /// 1. Builds the dependency graph
    /// 2. Performs topological sort
    /// 3. Assigns step-spaced priorities
    fn resolve(&self, declarations: &DeclarationSet) -> Result<OrderResult, OrderingError>;

    /// Write a computed order to a registry.
    ///
    /// Items the registry does not know are reported as warnings.
    fn apply(&self, result: &OrderResult, registry: &mut dyn PriorityRegistry) -> ApplyReport;

    /// Resolve, then apply only if resolution succeeded.
    fn resolve_and_apply(
        &self,
        declarations: &DeclarationSet,
        registry: &mut dyn PriorityRegistry,
    ) -> Result<ApplyReport, OrderingError> {
        let result = self.resolve(declarations)?;
        Ok(self.apply(&result, registry))
    }
}
