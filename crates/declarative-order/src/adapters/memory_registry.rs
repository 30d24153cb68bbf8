//! In-memory priority registry.

use crate::domain::value_objects::ItemId;
use crate::ports::outbound::PriorityRegistry;
use std::collections::BTreeMap;

/// Registry backed by an ordered map. Only items inserted up front are
/// known; anything else resolves as an unresolved item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryRegistry {
    entries: BTreeMap<ItemId, i32>,
    writes: usize,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known items, all starting at priority 0.
    pub fn with_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        Self {
            entries: items.into_iter().map(|i| (i.into(), 0)).collect(),
            writes: 0,
        }
    }

    pub fn insert(&mut self, item: impl Into<ItemId>, priority: i32) {
        self.entries.insert(item.into(), priority);
    }

    pub fn entries(&self) -> &BTreeMap<ItemId, i32> {
        &self.entries
    }

    /// Number of `set_priority` calls received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PriorityRegistry for InMemoryRegistry {
    fn priority_of(&self, item: &ItemId) -> Option<i32> {
        self.entries.get(item).copied()
    }

    fn set_priority(&mut self, item: &ItemId, priority: i32) {
        if let Some(slot) = self.entries.get_mut(item) {
            *slot = priority;
            self.writes += 1;
        }
    }
}
