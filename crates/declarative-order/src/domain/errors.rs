//! Error types for declarative ordering

use super::value_objects::{Constraint, ItemId, MarkerKind};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// All errors that abort a resolution pass.
///
/// Nothing is applied to the registry when one of these is returned.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Two distinct items declare RunFirst
    #[error("Two items marked as RunFirst, only one is allowed: {existing} <=> {conflicting}")]
    ConflictingFirstMarker {
        existing: ItemId,
        conflicting: ItemId,
    },

    /// Two distinct items declare RunLast
    #[error("Two items marked as RunLast, only one is allowed: {existing} <=> {conflicting}")]
    ConflictingLastMarker {
        existing: ItemId,
        conflicting: ItemId,
    },

    /// RunFirst / RunLast combined with RunAfter / RunBefore on one item
    #[error("{marker} must be used alone, it can't be combined with RunAfter or RunBefore: {item}")]
    OrderingConflict { item: ItemId, marker: MarkerKind },

    /// One item declares both RunFirst and RunLast
    #[error("An item cannot be marked as RunFirst and RunLast at the same time: {item}")]
    FirstLastSameItem { item: ItemId },

    /// Another item's constraint would place something before the first
    /// item or after the last item
    #[error("{other} cannot be ordered around {item}, which is marked {marker}")]
    MarkerPrecedence {
        item: ItemId,
        marker: MarkerKind,
        other: ItemId,
    },

    /// Edges remain after the topological sort
    #[error("Cannot update execution order due to circular dependency: {}", EdgeList(.unresolved))]
    CyclicDependency { unresolved: Vec<Constraint> },

    /// Node count exceeded limits
    #[error("Item count exceeded: {count} > {max}")]
    TooManyItems { count: usize, max: usize },

    /// Edge count exceeded limits
    #[error("Constraint count exceeded: {count} > {max}")]
    TooManyEdges { count: usize, max: usize },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Declarations could not be loaded
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl OrderingError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderingError::ConflictingFirstMarker { .. } => "conflicting_first_marker",
            OrderingError::ConflictingLastMarker { .. } => "conflicting_last_marker",
            OrderingError::OrderingConflict { .. } => "ordering_conflict",
            OrderingError::FirstLastSameItem { .. } => "first_last_same_item",
            OrderingError::MarkerPrecedence { .. } => "marker_precedence",
            OrderingError::CyclicDependency { .. } => "cyclic_dependency",
            OrderingError::TooManyItems { .. } => "too_many_items",
            OrderingError::TooManyEdges { .. } => "too_many_edges",
            OrderingError::InvalidConfig(_) => "invalid_config",
            OrderingError::Source(_) => "source",
        }
    }

    /// Structural errors are detected before the graph is sorted.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            OrderingError::ConflictingFirstMarker { .. }
                | OrderingError::ConflictingLastMarker { .. }
                | OrderingError::OrderingConflict { .. }
                | OrderingError::FirstLastSameItem { .. }
                | OrderingError::MarkerPrecedence { .. }
        )
    }

    /// Items named by this diagnostic.
    pub fn items(&self) -> Vec<&ItemId> {
        match self {
            OrderingError::ConflictingFirstMarker {
                existing,
                conflicting,
            }
            | OrderingError::ConflictingLastMarker {
                existing,
                conflicting,
            } => vec![existing, conflicting],
            OrderingError::OrderingConflict { item, .. }
            | OrderingError::FirstLastSameItem { item } => vec![item],
            OrderingError::MarkerPrecedence { item, other, .. } => vec![item, other],
            OrderingError::CyclicDependency { unresolved } => {
                let mut items: Vec<&ItemId> = Vec::new();
                for edge in unresolved {
                    for id in [&edge.from, &edge.to] {
                        if !items.contains(&id) {
                            items.push(id);
                        }
                    }
                }
                items
            }
            _ => Vec::new(),
        }
    }
}

/// Non-fatal diagnostics collected while applying priorities.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OrderingWarning {
    /// A computed priority has no matching registry entry; it is dropped
    #[error("Unable to set execution order of {item}: no registry entry matches this item")]
    UnresolvedItem { item: ItemId },
}

/// Declaration source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read declarations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse declaration manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid declaration manifest: {0}")]
    InvalidManifest(String),
}

/// Priority registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse registry: {0}")]
    Parse(#[from] serde_json::Error),
}

struct EdgeList<'a>(&'a [Constraint]);

impl fmt::Display for EdgeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{edge}")?;
        }
        Ok(())
    }
}
