//! Domain invariants for a computed order

use super::entities::{DependencyGraph, OrderResult, ScanOutcome};
use super::value_objects::ItemId;
use std::collections::HashSet;

/// INVARIANT-1: Constraints respected.
/// For every edge `from -> to`, `priority(from) < priority(to)`.
pub fn invariant_constraints_respected(result: &OrderResult, graph: &DependencyGraph) -> bool {
    graph.edges.iter().all(|edge| {
        match (result.priority_of(&edge.from), result.priority_of(&edge.to)) {
            (Some(from), Some(to)) => from < to,
            _ => false,
        }
    })
}

/// INVARIANT-2: Markers are extreme.
/// The first item holds exactly `step` and is strictly least; the last item
/// is strictly greatest.
pub fn invariant_markers_extreme(
    result: &OrderResult,
    first: Option<&ItemId>,
    last: Option<&ItemId>,
) -> bool {
    if let Some(first) = first {
        let Some(p) = result.priority_of(first) else {
            return false;
        };
        if p != result.step {
            return false;
        }
        if result
            .entries
            .iter()
            .any(|e| &e.item != first && e.priority <= p)
        {
            return false;
        }
    }

    if let Some(last) = last {
        let Some(p) = result.priority_of(last) else {
            return false;
        };
        if result
            .entries
            .iter()
            .any(|e| &e.item != last && e.priority >= p)
        {
            return false;
        }
    }

    true
}

/// INVARIANT-3: Step spacing.
/// Priorities are distinct, positive multiples of `step`, ascending.
pub fn invariant_step_spacing(result: &OrderResult) -> bool {
    let step = result.step;
    if step <= 0 {
        return false;
    }

    let mut previous = 0;
    for entry in &result.entries {
        if entry.priority <= previous || entry.priority % step != 0 {
            return false;
        }
        previous = entry.priority;
    }

    true
}

/// INVARIANT-4: Completeness.
/// Every node and marker is assigned exactly once.
pub fn invariant_completeness(result: &OrderResult, scan: &ScanOutcome) -> bool {
    let mut expected: HashSet<&ItemId> = scan.graph.nodes.iter().collect();
    expected.extend(scan.first.iter());
    expected.extend(scan.last.iter());

    let assigned: HashSet<&ItemId> = result.entries.iter().map(|e| &e.item).collect();

    assigned.len() == result.entries.len() && assigned == expected
}
