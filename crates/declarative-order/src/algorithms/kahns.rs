//! Kahn's Topological Sort Algorithm
//!
//! O(V + E), FIFO worklist, reports every unresolved edge on a cycle.

use crate::domain::entities::DependencyGraph;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{Constraint, ItemId};
use std::collections::{HashSet, VecDeque};

/// Perform Kahn's topological sort on the dependency graph.
///
/// The worklist is seeded with zero in-degree nodes in insertion order, so
/// an unchanged graph always yields the same order. When the worklist
/// drains with nodes left over, every edge whose source was never emitted
/// is reported in `CyclicDependency`.
pub fn kahns_topological_sort(graph: &DependencyGraph) -> Result<Vec<ItemId>, OrderingError> {
    // 1. Copy in-degree map (we'll modify it)
    let mut in_degree = graph.in_degree.clone();

    // 2. Seed with zero in-degree nodes
    let mut queue: VecDeque<&ItemId> = graph.zero_degree_nodes().into_iter().collect();

    let mut ordered: Vec<ItemId> = Vec::with_capacity(graph.node_count());
    let mut emitted: HashSet<&ItemId> = HashSet::with_capacity(graph.node_count());

    // 3. Drain the worklist
    while let Some(node) = queue.pop_front() {
        if !emitted.insert(node) {
            continue;
        }
        ordered.push(node.clone());

        let Some(neighbors) = graph.adjacency.get(node) else {
            continue;
        };
        for neighbor in neighbors {
            let Some(degree) = in_degree.get_mut(neighbor) else {
                continue;
            };
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                queue.push_back(neighbor);
            }
        }
    }

    // 4. Cycle detection: edges out of never-emitted nodes were never removed
    if ordered.len() < graph.node_count() {
        let unresolved: Vec<Constraint> = graph
            .edges
            .iter()
            .filter(|edge| !emitted.contains(&edge.from))
            .cloned()
            .collect();
        return Err(OrderingError::CyclicDependency { unresolved });
    }

    Ok(ordered)
}
