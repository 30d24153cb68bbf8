//! Core entities for declarative ordering

use super::errors::OrderingWarning;
use super::value_objects::{Constraint, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Dependency graph for one resolution pass.
///
/// Nodes keep insertion order so that the sort is deterministic for an
/// unchanged declaration set. Edges are a set: adding the same pair twice
/// has no effect.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// All nodes, in insertion order
    pub nodes: Vec<ItemId>,
    /// All edges, in insertion order
    pub edges: Vec<Constraint>,
    /// Adjacency list: from -> [to, to, ...]
    pub adjacency: HashMap<ItemId, Vec<ItemId>>,
    /// In-degree count for each node
    pub in_degree: HashMap<ItemId, usize>,
    /// Edge lookup for O(1) dedup
    edge_set: HashSet<Constraint>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false if it was already present.
    pub fn add_node(&mut self, item: ItemId) -> bool {
        if self.in_degree.contains_key(&item) {
            return false;
        }
        self.adjacency.entry(item.clone()).or_default();
        self.in_degree.insert(item.clone(), 0);
        self.nodes.push(item);
        true
    }

    /// Add an edge, creating both endpoints. Returns false for a duplicate.
    pub fn add_edge(&mut self, edge: Constraint) -> bool {
        self.add_node(edge.from.clone());
        self.add_node(edge.to.clone());

        if !self.edge_set.insert(edge.clone()) {
            return false;
        }

        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
        *self.in_degree.entry(edge.to.clone()).or_insert(0) += 1;
        self.edges.push(edge);
        true
    }

    /// Check if an edge exists from -> to
    pub fn has_edge(&self, from: &ItemId, to: &ItemId) -> bool {
        self.edge_set
            .contains(&Constraint::new(from.clone(), to.clone()))
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.in_degree.contains_key(item)
    }

    /// Zero in-degree nodes, in insertion order
    pub fn zero_degree_nodes(&self) -> Vec<&ItemId> {
        self.nodes
            .iter()
            .filter(|n| self.in_degree.get(*n) == Some(&0))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Result of scanning the declarations: the graph plus the two markers.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub graph: DependencyGraph,
    pub first: Option<ItemId>,
    pub last: Option<ItemId>,
}

impl ScanOutcome {
    /// Total number of distinct items that will receive a priority.
    pub fn item_count(&self) -> usize {
        let extra = [&self.first, &self.last]
            .into_iter()
            .flatten()
            .filter(|m| !self.graph.contains(m))
            .count();
        self.graph.node_count() + extra
    }
}

/// One computed priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityEntry {
    pub item: ItemId,
    pub priority: i32,
}

impl PriorityEntry {
    pub fn new(item: ItemId, priority: i32) -> Self {
        Self { item, priority }
    }
}

/// Computed order: entries ascending by priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    /// Spacing between consecutive priorities
    pub step: i32,
    /// Entries in execution order
    pub entries: Vec<PriorityEntry>,
}

impl OrderResult {
    pub fn new(step: i32, entries: Vec<PriorityEntry>) -> Self {
        Self { step, entries }
    }

    pub fn priority_of(&self, item: &ItemId) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| &e.item == item)
            .map(|e| e.priority)
    }

    /// Items in execution order
    pub fn ordered_items(&self) -> Vec<&ItemId> {
        self.entries.iter().map(|e| &e.item).collect()
    }

    pub fn to_map(&self) -> HashMap<ItemId, i32> {
        self.entries
            .iter()
            .map(|e| (e.item.clone(), e.priority))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of applying an `OrderResult` to a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Items whose priority was written
    pub applied: Vec<ItemId>,
    /// Items already at the computed priority
    pub unchanged: Vec<ItemId>,
    /// Non-fatal diagnostics
    pub warnings: Vec<OrderingWarning>,
}

impl ApplyReport {
    /// Items dropped because the registry does not know them
    pub fn unresolved(&self) -> Vec<&ItemId> {
        self.warnings
            .iter()
            .map(|w| match w {
                OrderingWarning::UnresolvedItem { item } => item,
            })
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
