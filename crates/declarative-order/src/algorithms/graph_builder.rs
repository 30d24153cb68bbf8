//! Dependency Graph Builder
//!
//! Scans declared items into a dependency graph and picks out the
//! RunFirst / RunLast markers. All structural checks happen here, before
//! any sorting.

use crate::domain::entities::{DependencyGraph, ScanOutcome};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{
    Constraint, DeclarationSet, DeclaredItem, ItemId, MarkerKind, OrderingDeclaration,
};
use tracing::debug;

/// Build the dependency graph for a declaration set.
///
/// For each item, in declaration order:
/// 1. RunAfter {D..}: edge `D -> item` for each D
/// 2. RunBefore {D..}: edge `item -> D` for each D
/// 3. RunFirst / RunLast: claim the marker, which must be exclusive and
///    must not be combined with RunAfter / RunBefore
/// 4. Nothing declared: the item becomes an unconstrained node
///
/// The first structural problem found aborts the scan.
pub fn build_dependency_graph(declarations: &DeclarationSet) -> Result<ScanOutcome, OrderingError> {
    let mut graph = DependencyGraph::new();
    let mut first: Option<ItemId> = None;
    let mut last: Option<ItemId> = None;

    for item in declarations.items() {
        add_constraints(&mut graph, item);

        let has_ordering = item.has_constraints();
        for declaration in &item.declarations {
            match declaration {
                OrderingDeclaration::First => {
                    claim_marker(&mut first, item, has_ordering, MarkerKind::First)?
                }
                OrderingDeclaration::Last => {
                    claim_marker(&mut last, item, has_ordering, MarkerKind::Last)?
                }
                _ => {}
            }
        }

        if item.is_unconstrained() {
            graph.add_node(item.id.clone());
        }
    }

    if let (Some(f), Some(l)) = (&first, &last) {
        if f == l {
            return Err(OrderingError::FirstLastSameItem { item: f.clone() });
        }
    }

    check_marker_precedence(&graph, first.as_ref(), last.as_ref())?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        first = ?first,
        last = ?last,
        "Dependency graph built"
    );

    Ok(ScanOutcome { graph, first, last })
}

fn add_constraints(graph: &mut DependencyGraph, item: &DeclaredItem) {
    for declaration in &item.declarations {
        match declaration {
            OrderingDeclaration::After(deps) => {
                graph.add_node(item.id.clone());
                for dep in deps {
                    graph.add_edge(Constraint::new(dep.clone(), item.id.clone()));
                }
            }
            OrderingDeclaration::Before(deps) => {
                graph.add_node(item.id.clone());
                for dep in deps {
                    graph.add_edge(Constraint::new(item.id.clone(), dep.clone()));
                }
            }
            _ => {}
        }
    }
}

fn claim_marker(
    slot: &mut Option<ItemId>,
    item: &DeclaredItem,
    has_ordering: bool,
    marker: MarkerKind,
) -> Result<(), OrderingError> {
    if has_ordering {
        return Err(OrderingError::OrderingConflict {
            item: item.id.clone(),
            marker,
        });
    }

    match slot {
        Some(existing) if *existing != item.id => {
            let existing = existing.clone();
            let conflicting = item.id.clone();
            Err(match marker {
                MarkerKind::First => OrderingError::ConflictingFirstMarker {
                    existing,
                    conflicting,
                },
                MarkerKind::Last => OrderingError::ConflictingLastMarker {
                    existing,
                    conflicting,
                },
            })
        }
        _ => {
            *slot = Some(item.id.clone());
            Ok(())
        }
    }
}

/// Other items may run after the first item or before the last item, but
/// never the other way round.
fn check_marker_precedence(
    graph: &DependencyGraph,
    first: Option<&ItemId>,
    last: Option<&ItemId>,
) -> Result<(), OrderingError> {
    for edge in &graph.edges {
        if Some(&edge.to) == first {
            return Err(OrderingError::MarkerPrecedence {
                item: edge.to.clone(),
                marker: MarkerKind::First,
                other: edge.from.clone(),
            });
        }
        if Some(&edge.from) == last {
            return Err(OrderingError::MarkerPrecedence {
                item: edge.from.clone(),
                marker: MarkerKind::Last,
                other: edge.to.clone(),
            });
        }
    }
    Ok(())
}
