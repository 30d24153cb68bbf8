//! Value objects for declarative ordering
//!
//! Items, constraints and the declarations attached to them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique key of an orderable item (typically a fully qualified type name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ItemId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Directed "must precede" edge: `from` is ordered before `to`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    pub from: ItemId,
    pub to: ItemId,
}

impl Constraint {
    pub fn new(from: ItemId, to: ItemId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <=> {}", self.from, self.to)
    }
}

/// The two exclusive pseudo-positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    First,
    Last,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::First => f.write_str("RunFirst"),
            MarkerKind::Last => f.write_str("RunLast"),
        }
    }
}

/// A single ordering declaration attached to an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingDeclaration {
    /// The item runs after every listed dependency.
    After(Vec<ItemId>),
    /// The item runs before every listed dependant.
    Before(Vec<ItemId>),
    /// The item runs before everything else.
    First,
    /// The item runs after everything else.
    Last,
    /// The item takes part in ordering without any constraint.
    None,
}

/// Every declaration attached to one item, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredItem {
    pub id: ItemId,
    pub declarations: Vec<OrderingDeclaration>,
}

impl DeclaredItem {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            declarations: Vec::new(),
        }
    }

    /// True when the item carries any RunAfter / RunBefore declaration.
    pub fn has_constraints(&self) -> bool {
        self.declarations.iter().any(|d| {
            matches!(
                d,
                OrderingDeclaration::After(_) | OrderingDeclaration::Before(_)
            )
        })
    }

    pub fn is_first(&self) -> bool {
        self.declarations.contains(&OrderingDeclaration::First)
    }

    pub fn is_last(&self) -> bool {
        self.declarations.contains(&OrderingDeclaration::Last)
    }

    /// True when the item is only registered, with nothing declared.
    pub fn is_unconstrained(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// The universe of declared items for one resolution pass.
///
/// Items keep their first-seen order; repeated declarations for the same
/// item are merged the way several attributes on one type would be.
#[derive(Clone, Debug, Default)]
pub struct DeclarationSet {
    items: Vec<DeclaredItem>,
    index: HashMap<ItemId, usize>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(item, declaration)` records.
    pub fn from_records<I, T>(records: I) -> Self
    where
        I: IntoIterator<Item = (T, OrderingDeclaration)>,
        T: Into<ItemId>,
    {
        let mut set = Self::new();
        for (item, declaration) in records {
            set.declare(item, declaration);
        }
        set
    }

    /// Attach a declaration to an item, creating the item if needed.
    pub fn declare(
        &mut self,
        item: impl Into<ItemId>,
        declaration: OrderingDeclaration,
    ) -> &mut Self {
        let entry = self.entry(item.into());
        if declaration != OrderingDeclaration::None {
            entry.declarations.push(declaration);
        }
        self
    }

    pub fn register(mut self, item: impl Into<ItemId>) -> Self {
        self.declare(item, OrderingDeclaration::None);
        self
    }

    pub fn run_after<I, T>(mut self, item: impl Into<ItemId>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        let deps = dependencies.into_iter().map(Into::into).collect();
        self.declare(item, OrderingDeclaration::After(deps));
        self
    }

    pub fn run_before<I, T>(mut self, item: impl Into<ItemId>, dependants: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        let deps = dependants.into_iter().map(Into::into).collect();
        self.declare(item, OrderingDeclaration::Before(deps));
        self
    }

    pub fn run_first(mut self, item: impl Into<ItemId>) -> Self {
        self.declare(item, OrderingDeclaration::First);
        self
    }

    pub fn run_last(mut self, item: impl Into<ItemId>) -> Self {
        self.declare(item, OrderingDeclaration::Last);
        self
    }

    pub fn items(&self) -> &[DeclaredItem] {
        &self.items
    }

    pub fn get(&self, item: &ItemId) -> Option<&DeclaredItem> {
        self.index.get(item).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn entry(&mut self, item: ItemId) -> &mut DeclaredItem {
        let next = self.items.len();
        let idx = *self.index.entry(item.clone()).or_insert(next);
        if idx == next {
            self.items.push(DeclaredItem::new(item));
        }
        &mut self.items[idx]
    }
}
