use gobl_property::test_utils::sample_properties;
use gobl_property::{Properties, Property, PropertyStore, StoreError};
use gobl_state_fs::{FsStore, FsStoreConfig};
use std::sync::Arc;

fn settings(theme: &str) -> Properties {
    [
        Property::string("theme", theme),
        Property::bool("compact", true),
        Property::int8_array("offsets", [-1, 0, 1]),
    ]
    .into_iter()
    .collect()
}

// --- Basic CRUD ---

#[tokio::test]
async fn write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("key1", &settings("dark")).await.unwrap();

    let val = store.read("key1").await.unwrap();
    assert_eq!(val, Some(settings("dark")));
}

#[tokio::test]
async fn read_missing_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    assert_eq!(store.read("missing").await.unwrap(), None);
}

#[tokio::test]
async fn overwrite_replaces_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("key1", &settings("dark")).await.unwrap();
    store.write("key1", &settings("light")).await.unwrap();

    let val = store.read("key1").await.unwrap().unwrap();
    assert_eq!(val.require("theme").unwrap().as_str().unwrap(), "light");
}

#[tokio::test]
async fn delete_removes_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("key1", &settings("dark")).await.unwrap();
    store.delete("key1").await.unwrap();

    assert_eq!(store.read("key1").await.unwrap(), None);
}

#[tokio::test]
async fn delete_missing_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.delete("nonexistent").await.unwrap();
}

// --- Persistence ---

#[tokio::test]
async fn every_type_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    FsStore::new(dir.path())
        .write("all", &sample_properties())
        .await
        .unwrap();

    let reopened = FsStore::new(dir.path());
    let back = reopened.read("all").await.unwrap().unwrap();
    assert_eq!(back, sample_properties());
}

#[tokio::test]
async fn corrupt_file_is_an_encoding_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    std::fs::write(
        dir.path().join("bad.json"),
        r#"{"n":{"name":"n","type":3,"value":200}}"#,
    )
    .unwrap();

    assert!(matches!(
        store.read("bad").await,
        Err(StoreError::Encoding(_))
    ));
}

// --- List ---

#[tokio::test]
async fn list_by_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.write("user:name", &settings("a")).await.unwrap();
    store.write("user:email", &settings("b")).await.unwrap();
    store.write("config:theme", &settings("c")).await.unwrap();
    std::fs::write(dir.path().join("stray.txt"), "ignored").unwrap();

    let keys = store.list("user:").await.unwrap();
    assert_eq!(keys, vec!["user:email", "user:name"]);
    assert_eq!(store.list("").await.unwrap().len(), 3);
}

#[tokio::test]
async fn list_before_first_write_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::with_config(FsStoreConfig {
        root: dir.path().join("not-yet"),
        ..FsStoreConfig::default()
    });

    assert!(store.list("").await.unwrap().is_empty());
}

// --- Object safety ---

#[tokio::test]
async fn usable_as_arc_dyn_property_store() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn PropertyStore> = Arc::new(FsStore::new(dir.path()));

    store.write("key", &settings("dark")).await.unwrap();
    let val = store.read("key").await.unwrap();
    assert_eq!(val, Some(settings("dark")));
}
