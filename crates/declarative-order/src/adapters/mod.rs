//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits: where declarations come from and where
//! computed priorities go.

mod json_registry;
mod manifest_source;
mod memory_registry;
mod static_source;

pub use json_registry::JsonFileRegistry;
pub use manifest_source::{parse_manifest, Manifest, ManifestDeclarationSource, ManifestItem};
pub use memory_registry::InMemoryRegistry;
pub use static_source::StaticDeclarationSource;
