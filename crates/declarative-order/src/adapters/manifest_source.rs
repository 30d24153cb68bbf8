//! Manifest Declaration Source Adapter
//!
//! Reads declarations from a JSON manifest:
//!
//! ```json
//! {
//!   "items": [
//!     { "name": "Game.Boot", "first": true },
//!     { "name": "Game.Player", "after": ["Game.Input"] },
//!     { "name": "Game.Input", "before": ["Game.Camera"] },
//!     { "name": "Game.Audio" }
//!   ]
//! }
//! ```

use crate::domain::errors::SourceError;
use crate::domain::value_objects::{DeclarationSet, ItemId, OrderingDeclaration};
use crate::ports::outbound::DeclarationSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level manifest document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub items: Vec<ManifestItem>,
}

/// One item entry in a manifest
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestItem {
    pub name: String,
    pub after: Vec<String>,
    pub before: Vec<String>,
    pub first: bool,
    pub last: bool,
}

impl Manifest {
    pub fn into_declarations(self) -> Result<DeclarationSet, SourceError> {
        let mut set = DeclarationSet::new();

        for (index, item) in self.items.into_iter().enumerate() {
            let name = item.name.trim();
            if name.is_empty() {
                return Err(SourceError::InvalidManifest(format!(
                    "item #{index} has an empty name"
                )));
            }
            if let Some(blank) = item
                .after
                .iter()
                .chain(item.before.iter())
                .find(|d| d.trim().is_empty())
            {
                return Err(SourceError::InvalidManifest(format!(
                    "item {name} references an empty name ({blank:?})"
                )));
            }

            let id = ItemId::new(name);
            set.declare(id.clone(), OrderingDeclaration::None);
            if !item.after.is_empty() {
                set.declare(id.clone(), OrderingDeclaration::After(to_ids(&item.after)));
            }
            if !item.before.is_empty() {
                set.declare(id.clone(), OrderingDeclaration::Before(to_ids(&item.before)));
            }
            if item.first {
                set.declare(id.clone(), OrderingDeclaration::First);
            }
            if item.last {
                set.declare(id, OrderingDeclaration::Last);
            }
        }

        Ok(set)
    }
}

fn to_ids(names: &[String]) -> Vec<ItemId> {
    names.iter().map(|n| ItemId::new(n.trim())).collect()
}

/// Parse a manifest document into a declaration set.
pub fn parse_manifest(json: &str) -> Result<DeclarationSet, SourceError> {
    let manifest: Manifest = serde_json::from_str(json)?;
    manifest.into_declarations()
}

/// Loads declarations from a manifest file on every reload.
#[derive(Clone, Debug)]
pub struct ManifestDeclarationSource {
    path: PathBuf,
}

impl ManifestDeclarationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeclarationSource for ManifestDeclarationSource {
    fn load_declarations(&self) -> Result<DeclarationSet, SourceError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let set = parse_manifest(&json)?;

        debug!(
            path = %self.path.display(),
            items = set.len(),
            "Loaded declaration manifest"
        );

        Ok(set)
    }
}
