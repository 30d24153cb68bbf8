//! Algorithms module for declarative ordering
//!
//! Contains:
//! - Dependency graph builder (scan + structural checks)
//! - Kahn's topological sort
//! - Priority assignment

pub mod graph_builder;
pub mod kahns;
pub mod priorities;

pub use graph_builder::build_dependency_graph;
pub use kahns::kahns_topological_sort;
pub use priorities::{assign_priorities, DEFAULT_STEP};
