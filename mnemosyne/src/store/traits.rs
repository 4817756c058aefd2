use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Memory;

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Whole-log persistence for memory records.
///
/// The log is read in full and rewritten in full. Implementations do not
/// lock across processes; callers serialize writers.
pub trait MemoryStore: Send + Sync {
    /// Every stored record in insertion order. A missing or malformed
    /// backing store reads as empty rather than failing.
    fn load(&self) -> Vec<Memory>;

    /// Replace the stored log with `memories`.
    fn save(&self, memories: &[Memory]) -> Result<()>;

    /// Append `new_memories` and return the combined log.
    fn append(&self, new_memories: &[Memory]) -> Result<Vec<Memory>> {
        let mut combined = self.load();
        combined.extend_from_slice(new_memories);
        self.save(&combined)?;
        Ok(combined)
    }

    /// Copy the current log into `dir`. Stores without a file backing
    /// return `None`.
    fn snapshot(&self, _dir: &Path) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}
