//! # Integration Test Flows
//!
//! Manifest file -> resolver -> JSON registry file, through the public
//! ports and adapters only.
//!
//! ## Flows Tested:
//!
//! 1. **Resolve and save**: computed priorities land in the registry file
//! 2. **Failure isolation**: structural errors and cycles leave the file untouched
//! 3. **Partial registry**: unknown items are reported, the rest still applied

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use declarative_order::adapters::{JsonFileRegistry, ManifestDeclarationSource};
    use declarative_order::{
        DeclarationSource, ItemId, OrderResolverApi, OrderResolverService, OrderingError,
        OrderingWarning, PriorityRegistry,
    };

    use crate::fixtures::make_manifest;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn read_registry(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn id(name: &str) -> ItemId {
        ItemId::from(name)
    }

    // =============================================================================
    // RESOLVE AND SAVE
    // =============================================================================

    /// Test: A game-loop style manifest is resolved and saved.
    #[test]
    fn test_manifest_to_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(
            &dir,
            "order.json",
            r#"{
                "items": [
                    { "name": "Game.Boot", "first": true },
                    { "name": "Game.Player", "after": ["Game.Input"] },
                    { "name": "Game.Input" },
                    { "name": "Game.Camera", "last": true }
                ]
            }"#,
        );
        let registry_path = write_file(
            &dir,
            "registry.json",
            r#"{ "Game.Boot": 0, "Game.Player": 0, "Game.Input": 0, "Game.Camera": 0 }"#,
        );

        let declarations = ManifestDeclarationSource::new(&manifest)
            .load_declarations()
            .unwrap();
        let mut registry = JsonFileRegistry::open(&registry_path).unwrap();
        let report = OrderResolverService::new()
            .resolve_and_apply(&declarations, &mut registry)
            .unwrap();
        registry.save().unwrap();

        assert!(report.is_clean());
        assert_eq!(
            read_registry(&registry_path),
            serde_json::json!({
                "Game.Boot": 10,
                "Game.Input": 20,
                "Game.Player": 30,
                "Game.Camera": 40
            })
        );
    }

    /// Test: Re-running on an up-to-date registry writes nothing.
    #[test]
    fn test_second_run_leaves_registry_clean() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(&dir, "order.json", &make_manifest(&[("B", &["A"]), ("A", &[])]));
        let registry_path = write_file(&dir, "registry.json", r#"{ "A": 10, "B": 20 }"#);

        let declarations = ManifestDeclarationSource::new(&manifest)
            .load_declarations()
            .unwrap();
        let mut registry = JsonFileRegistry::open(&registry_path).unwrap();
        let report = OrderResolverService::new()
            .resolve_and_apply(&declarations, &mut registry)
            .unwrap();

        assert!(report.applied.is_empty());
        assert_eq!(report.unchanged.len(), 2);
        assert!(!registry.is_dirty());
    }

    // =============================================================================
    // FAILURE ISOLATION
    // =============================================================================

    /// Test: Two RunFirst items abort before anything is applied.
    #[test]
    fn test_conflicting_first_markers_apply_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(
            &dir,
            "order.json",
            r#"{ "items": [ { "name": "A", "first": true }, { "name": "B", "first": true } ] }"#,
        );
        let registry_path = write_file(&dir, "registry.json", r#"{ "A": 5, "B": 6 }"#);

        let declarations = ManifestDeclarationSource::new(&manifest)
            .load_declarations()
            .unwrap();
        let mut registry = JsonFileRegistry::open(&registry_path).unwrap();
        let result = OrderResolverService::new().resolve_and_apply(&declarations, &mut registry);

        assert!(matches!(
            result,
            Err(OrderingError::ConflictingFirstMarker { .. })
        ));
        assert!(!registry.is_dirty());
        assert_eq!(registry.priority_of(&id("A")), Some(5));
    }

    /// Test: A cycle is reported with every unresolved edge.
    #[test]
    fn test_cycle_reports_edges_and_applies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(
            &dir,
            "order.json",
            &make_manifest(&[("A", &["C"]), ("B", &["A"]), ("C", &["B"]), ("D", &[])]),
        );
        let registry_path = write_file(&dir, "registry.json", r#"{ "A": 1, "B": 2, "C": 3, "D": 4 }"#);

        let declarations = ManifestDeclarationSource::new(&manifest)
            .load_declarations()
            .unwrap();
        let mut registry = JsonFileRegistry::open(&registry_path).unwrap();
        let err = OrderResolverService::new()
            .resolve_and_apply(&declarations, &mut registry)
            .unwrap_err();

        match &err {
            OrderingError::CyclicDependency { unresolved } => assert_eq!(unresolved.len(), 3),
            other => panic!("expected cycle, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("C <=> A"));
        assert!(message.contains("A <=> B"));
        assert!(message.contains("B <=> C"));
        assert!(!registry.is_dirty());
    }

    /// Test: A broken manifest surfaces as a source error.
    #[test]
    fn test_malformed_manifest_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(&dir, "order.json", r#"{ "items": [ { "name": "A", "aftr": [] } ] }"#);

        let err = ManifestDeclarationSource::new(&manifest)
            .load_declarations()
            .map_err(OrderingError::from)
            .unwrap_err();

        assert_eq!(err.kind(), "source");
    }

    // =============================================================================
    // PARTIAL REGISTRY
    // =============================================================================

    /// Test: Items missing from the registry are warned about, others applied.
    #[test]
    fn test_unresolved_item_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(
            &dir,
            "order.json",
            &make_manifest(&[("B", &["A"]), ("C", &["B"])]),
        );
        let registry_path = write_file(&dir, "registry.json", r#"{ "A": 0, "C": 0 }"#);

        let declarations = ManifestDeclarationSource::new(&manifest)
            .load_declarations()
            .unwrap();
        let mut registry = JsonFileRegistry::open(&registry_path).unwrap();
        let report = OrderResolverService::new()
            .resolve_and_apply(&declarations, &mut registry)
            .unwrap();
        registry.save().unwrap();

        assert_eq!(
            report.warnings,
            vec![OrderingWarning::UnresolvedItem { item: id("B") }]
        );
        assert_eq!(
            read_registry(&registry_path),
            serde_json::json!({ "A": 10, "C": 30 })
        );
    }
}
