use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use crate::error::Result;
use crate::models::Memory;
use crate::store::MemoryStore;

/// Memory log kept as a pretty-printed JSON array in a single file.
///
/// Reads validate every record: malformed entries are dropped, confidence is
/// clamped to `[0, 1]`, topics are lowercased and deduplicated, and a
/// `revision_of` that does not point at an earlier record is cleared.
/// Writes go through a sibling temporary file that is renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy the current log to `<dir>/<stem>_<yyyymmddTHHMMSS_micros>.json`.
    ///
    /// An existing snapshot is never overwritten: a numeric suffix is added
    /// when the name is taken. Returns `None` without writing anything when
    /// the log is empty.
    pub fn snapshot(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let memories = self.load();
        if memories.is_empty() {
            tracing::debug!(path = %self.path.display(), "Store is empty, skipping snapshot");
            return Ok(None);
        }

        fs::create_dir_all(dir)?;
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("memories");
        let base = format!("{stem}_{}", Utc::now().format("%Y%m%dT%H%M%S_%6f"));
        let target = unused_snapshot_path(dir, &base);

        write_atomic(&target, &memories)?;
        tracing::info!(
            path = %target.display(),
            count = memories.len(),
            "Wrote store snapshot"
        );
        Ok(Some(target))
    }

    fn read_document(&self) -> Option<Vec<Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Store file does not exist yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read store, treating as empty");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => Some(items),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "Store is not a JSON array, treating as empty");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Store is not valid JSON, treating as empty");
                None
            }
        }
    }
}

impl MemoryStore for JsonFileStore {
    fn load(&self) -> Vec<Memory> {
        self.read_document()
            .map(validate_records)
            .unwrap_or_default()
    }

    fn save(&self, memories: &[Memory]) -> Result<()> {
        write_atomic(&self.path, memories)?;
        tracing::info!(
            path = %self.path.display(),
            count = memories.len(),
            "Saved memory store"
        );
        Ok(())
    }

    fn snapshot(&self, dir: &Path) -> Result<Option<PathBuf>> {
        JsonFileStore::snapshot(self, dir)
    }
}

/// Coerce raw store entries into well-formed memories, in order.
pub fn validate_records(items: Vec<Value>) -> Vec<Memory> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut memories = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let mut memory: Memory = match serde_json::from_value(item) {
            Ok(memory) => memory,
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed memory record");
                continue;
            }
        };

        memory.confidence = if memory.confidence.is_nan() {
            0.0
        } else {
            memory.confidence.clamp(0.0, 1.0)
        };

        let mut topics: Vec<String> = Vec::with_capacity(memory.topics.len());
        for topic in memory.topics.drain(..) {
            let lower = topic.trim().to_lowercase();
            if !lower.is_empty() && !topics.contains(&lower) {
                topics.push(lower);
            }
        }
        memory.topics = topics;

        if let Some(parent) = memory.revision_of.as_deref() {
            if !seen.contains(parent) {
                tracing::warn!(
                    id = %memory.id,
                    revision_of = %parent,
                    "Clearing revision link to unknown or later record"
                );
                memory.revision_of = None;
            }
        }

        seen.insert(memory.id.clone());
        memories.push(memory);
    }

    memories
}

fn unused_snapshot_path(dir: &Path, base: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{base}.json"));
    let mut n = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{base}_{n}.json"));
        n += 1;
    }
    candidate
}

fn write_atomic(path: &Path, memories: &[Memory]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "memories.json".into());
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let body = serde_json::to_string_pretty(memories)?;
    fs::write(&tmp_path, body)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
