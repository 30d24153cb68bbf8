//! JSON File Registry Adapter
//!
//! Priorities persisted as a flat JSON object, `{ "Game.Player": 20, ... }`.
//! Changes are held in memory until `save` is called, so a failed
//! resolution never touches the file. Saving writes a sibling temp file and
//! renames it over the registry, so the file is either old or new, never
//! partial.

use crate::domain::errors::RegistryError;
use crate::domain::value_objects::ItemId;
use crate::ports::outbound::PriorityRegistry;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct JsonFileRegistry {
    path: PathBuf,
    entries: BTreeMap<ItemId, i32>,
    dirty: bool,
}

impl JsonFileRegistry {
    /// Load an existing registry file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let json = std::fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let entries: BTreeMap<ItemId, i32> = serde_json::from_str(&json)?;

        debug!(path = %path.display(), entries = entries.len(), "Opened priority registry");

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<ItemId, i32> {
        &self.entries
    }

    /// True when priorities changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the registry back if anything changed.
    pub fn save(&mut self) -> Result<(), RegistryError> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let io_err = |source: std::io::Error| RegistryError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        staged.write_all(json.as_bytes()).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged.persist(&self.path).map_err(|e| io_err(e.error))?;
        self.dirty = false;

        debug!(path = %self.path.display(), "Saved priority registry");
        Ok(())
    }
}

impl PriorityRegistry for JsonFileRegistry {
    fn flush(&mut self) -> Result<(), RegistryError> {
        self.save()
    }

    fn priority_of(&self, item: &ItemId) -> Option<i32> {
        self.entries.get(item).copied()
    }

    fn set_priority(&mut self, item: &ItemId, priority: i32) {
        if let Some(slot) = self.entries.get_mut(item) {
            if *slot != priority {
                *slot = priority;
                self.dirty = true;
            }
        }
    }
}
