//! # Reload Trigger Flows
//!
//! A manifest on disk is edited between "declarations changed"
//! notifications; the handler recomputes once per notification.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio::sync::mpsc;

    use declarative_order::adapters::{JsonFileRegistry, ManifestDeclarationSource};
    use declarative_order::{ItemId, PriorityRegistry, ReloadHandler, ReloadRequest};

    use crate::fixtures::make_manifest;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Test: Edits to the manifest are picked up by the next reload.
    #[test]
    fn test_reload_picks_up_manifest_edits() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(&dir, "order.json", &make_manifest(&[("B", &["A"]), ("A", &[])]));
        let registry = write_file(&dir, "registry.json", r#"{ "A": 0, "B": 0 }"#);

        let mut handler = ReloadHandler::new(
            ManifestDeclarationSource::new(&manifest),
            JsonFileRegistry::open(&registry).unwrap(),
        );

        let response = handler.handle_reload(ReloadRequest::new("initial"));
        assert!(response.success);
        assert_eq!(handler.registry().priority_of(&ItemId::from("B")), Some(20));

        std::fs::write(&manifest, make_manifest(&[("A", &["B"]), ("B", &[])])).unwrap();
        let response = handler.handle_reload(ReloadRequest::new("A now runs after B"));

        assert!(response.success);
        assert_eq!(response.applied, 2);
        assert_eq!(handler.registry().priority_of(&ItemId::from("A")), Some(20));
        assert_eq!(handler.registry().priority_of(&ItemId::from("B")), Some(10));
    }

    /// Test: A successful reload reaches disk before the response is returned.
    #[test]
    fn test_reload_writes_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(&dir, "order.json", &make_manifest(&[("B", &["A"]), ("A", &[])]));
        let registry = write_file(&dir, "registry.json", r#"{ "A": 0, "B": 0 }"#);

        let mut handler = ReloadHandler::new(
            ManifestDeclarationSource::new(&manifest),
            JsonFileRegistry::open(&registry).unwrap(),
        );
        let response = handler.handle_reload(ReloadRequest::new("initial"));

        assert!(response.success);
        let reopened = JsonFileRegistry::open(&registry).unwrap();
        assert_eq!(reopened.priority_of(&ItemId::from("A")), Some(10));
        assert_eq!(reopened.priority_of(&ItemId::from("B")), Some(20));
    }

    /// Test: A cyclic edit is rejected and the registry keeps the last good order.
    #[test]
    fn test_cyclic_edit_keeps_last_good_order() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(&dir, "order.json", &make_manifest(&[("B", &["A"])]));
        let registry = write_file(&dir, "registry.json", r#"{ "A": 0, "B": 0 }"#);

        let mut handler = ReloadHandler::new(
            ManifestDeclarationSource::new(&manifest),
            JsonFileRegistry::open(&registry).unwrap(),
        );
        handler.handle_reload(ReloadRequest::new("initial"));

        std::fs::write(&manifest, make_manifest(&[("B", &["A"]), ("A", &["B"])])).unwrap();
        let response = handler.handle_reload(ReloadRequest::new("introduce cycle"));

        assert!(!response.success);
        assert_eq!(response.error_kind.as_deref(), Some("cyclic_dependency"));
        assert!(response.error.unwrap().contains("A <=> B"));
        assert_eq!(handler.registry().priority_of(&ItemId::from("A")), Some(10));
        assert_eq!(handler.registry().priority_of(&ItemId::from("B")), Some(20));
    }

    /// Test: The async loop drains every request and the registry file is
    /// written after each successful reload, with no explicit save.
    #[tokio::test]
    async fn test_reload_loop_persists_registry() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_file(
            &dir,
            "order.json",
            &make_manifest(&[("C", &["B"]), ("B", &["A"])]),
        );
        let registry = write_file(&dir, "registry.json", r#"{ "A": 0, "B": 0, "C": 0 }"#);

        let handler = ReloadHandler::new(
            ManifestDeclarationSource::new(&manifest),
            JsonFileRegistry::open(&registry).unwrap(),
        );
        let (tx, rx) = mpsc::channel(4);
        let (reply_tx, mut reply_rx) = mpsc::channel(4);
        let worker = tokio::spawn(handler.run(rx, Some(reply_tx)));

        for reason in ["startup", "file watcher", "manual"] {
            tx.send(ReloadRequest::new(reason)).await.unwrap();
        }
        drop(tx);

        let mut responses = Vec::new();
        while let Some(response) = reply_rx.recv().await {
            responses.push(response);
        }
        let (_, store) = worker.await.unwrap().into_parts();
        assert!(!store.is_dirty());

        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(responses[0].applied, 3);
        assert_eq!(responses[2].applied, 0);

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&registry).unwrap()).unwrap();
        assert_eq!(saved, serde_json::json!({ "A": 10, "B": 20, "C": 30 }));
    }
}
