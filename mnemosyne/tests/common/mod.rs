#![allow(dead_code)]

use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use mnemosyne::models::{Memory, MemoryType};
use mnemosyne::services::MemoryService;
use mnemosyne::store::JsonFileStore;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn memory(id: &str, content: &str, created_at: DateTime<Utc>, topics: &[&str]) -> Memory {
    Memory::new(
        id.to_string(),
        content.to_string(),
        created_at,
        MemoryType::Belief,
        "note".to_string(),
    )
    .with_confidence(0.9)
    .with_topics(topics.iter().copied())
}

/// A service over a JSON file inside a fresh temp dir. Keep the `TempDir`
/// alive for the duration of the test.
pub fn file_service() -> (TempDir, Arc<JsonFileStore>, MemoryService) {
    init_test_logger();
    let dir = TempDir::new().expect("temp dir");
    let store = Arc::new(JsonFileStore::new(dir.path().join("memories.json")));
    let service =
        MemoryService::new(store.clone()).with_snapshot_dir(dir.path().join("snapshots"));
    (dir, store, service)
}
