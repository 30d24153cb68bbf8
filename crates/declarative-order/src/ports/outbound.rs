//! Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::{RegistryError, SourceError};
use crate::domain::value_objects::{DeclarationSet, ItemId};

/// Enumerates items and their ordering declarations.
pub trait DeclarationSource: Send {
    /// Load the full declaration set for one resolution pass.
    fn load_declarations(&self) -> Result<DeclarationSet, SourceError>;
}

/// External store of per-item priorities.
pub trait PriorityRegistry: Send {
    /// Current priority of an item, or `None` if the registry has no entry
    /// for it.
    fn priority_of(&self, item: &ItemId) -> Option<i32>;

    /// Overwrite the priority of a known item.
    fn set_priority(&mut self, item: &ItemId, priority: i32);

    /// Persist applied priorities. In-memory registries have nothing to do.
    fn flush(&mut self) -> Result<(), RegistryError> {
        Ok(())
    }
}
