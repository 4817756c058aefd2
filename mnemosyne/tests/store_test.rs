mod common;

use std::fs;

use chrono::{TimeZone, Utc};

use common::{at, file_service, memory};
use mnemosyne::models::MemoryType;
use mnemosyne::services::IngestRequest;
use mnemosyne::store::{JsonFileStore, MemoryStore};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("memories.json"));

    let memories = vec![
        memory("a", "I believe tea is great.", at(2024, 1, 1), &["tea", "great"]),
        memory("b", "Tea is not great.", at(2024, 2, 1), &["tea", "great"])
            .with_confidence(0.7)
            .with_revision_of("a"),
        memory("c", "It rained.", at(2024, 3, 1), &["rained"]),
    ];

    store.save(&memories).unwrap();
    assert_eq!(store.load(), memories);
}

#[test]
fn test_reads_legacy_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memories.json");
    fs::write(
        &path,
        r#"[
  {
    "memory_id": "0b3c",
    "content": "I decided to learn Rust.",
    "created_at": "2024-05-01T08:00:00",
    "memory_type": "decision",
    "confidence": 0.7,
    "source": "note",
    "topic": ["decided", "learn", "rust"],
    "revision_of": null
  },
  { "memory_id": "broken" }
]"#,
    )
    .unwrap();

    let loaded = JsonFileStore::new(&path).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "0b3c");
    assert_eq!(loaded[0].memory_type, MemoryType::Decision);
    assert_eq!(loaded[0].created_at, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
}

#[test]
fn test_ingest_persists_across_service_instances() {
    let (dir, store, service) = file_service();
    service
        .ingest(IngestRequest {
            text: "I believe Rust is worth it. I will write more Rust.".to_string(),
            source: "note".to_string(),
            timestamp: Some("2024-01-01T12:00:00".to_string()),
            profile: None,
        })
        .unwrap();

    let reopened = JsonFileStore::new(store.path());
    assert_eq!(reopened.load().len(), 2);

    let raw = fs::read_to_string(dir.path().join("memories.json")).unwrap();
    assert!(raw.contains("\"memory_type\": \"belief\""));
    assert!(raw.contains("\"created_at\": \"2024-01-01T12:00:00Z\""));
}

#[test]
fn test_snapshot_via_service() {
    let (dir, _store, service) = file_service();
    assert_eq!(service.snapshot(None).unwrap(), None);

    service
        .ingest(IngestRequest {
            text: "I think snapshots help.".to_string(),
            source: "note".to_string(),
            timestamp: None,
            profile: None,
        })
        .unwrap();

    let path = service.snapshot(None).unwrap().expect("snapshot written");
    assert!(path.starts_with(dir.path().join("snapshots")));
    assert_eq!(JsonFileStore::new(&path).load().len(), 1);
}
