//! Read-only and maintenance commands against a temporary data directory.

use std::sync::Arc;

use clipstash::bootstrap::config::resolve_config_in;
use clipstash::bootstrap::wiring::build_history_store;
use clipstash::cli::{execute, Command};
use cs_core::ports::HistoryStorePort;
use cs_core::{ClipboardContent, ClipboardItem, ItemId, TimestampMs};

fn item(id: &str, ms: i64) -> ClipboardItem {
    ClipboardItem::restore(
        ItemId::from(id),
        TimestampMs::from_epoch_millis(ms),
        ClipboardContent::Text(format!("entry {id}")),
        false,
    )
}

#[tokio::test]
async fn test_commands_run_against_configured_storage() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[storage]\ndirectory = \"custom-history\"\n",
    )
    .unwrap();
    let mut config = resolve_config_in(dir.path(), None).unwrap();
    config.storage_dir = dir.path().join(&config.storage_dir);

    let store: Arc<dyn HistoryStorePort> = build_history_store(&config);
    store.save(&[item("b", 2), item("a", 1)]).await.unwrap();

    execute(
        Command::List {
            search: "ENTRY".into(),
            limit: Some(1),
        },
        &config,
    )
    .await
    .unwrap();
    execute(Command::Keyboard, &config).await.unwrap();
    execute(Command::Widget, &config).await.unwrap();
    execute(Command::Usage, &config).await.unwrap();

    execute(Command::Clear, &config).await.unwrap();

    assert!(store.load().await.unwrap().is_empty());
    assert!(dir.path().join("custom-history").exists());
}

#[tokio::test]
async fn test_favorite_and_delete_edit_stored_history() {
    let dir = tempfile::tempdir().unwrap();
    let config = resolve_config_in(dir.path(), None).unwrap();
    let store = build_history_store(&config);
    store
        .save(&[item("c", 3), item("b", 2), item("a", 1)])
        .await
        .unwrap();

    execute(Command::Favorite { index: 2 }, &config).await.unwrap();
    let ids: Vec<_> = store
        .load()
        .await
        .unwrap()
        .iter()
        .map(|i| i.id().to_string())
        .collect();
    assert_eq!(ids, ["a", "c", "b"]);

    execute(Command::Delete { index: 1 }, &config).await.unwrap();
    let ids: Vec<_> = store
        .load()
        .await
        .unwrap()
        .iter()
        .map(|i| i.id().to_string())
        .collect();
    assert_eq!(ids, ["a", "b"]);

    assert!(execute(Command::Delete { index: 9 }, &config).await.is_err());
}
