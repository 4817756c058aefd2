use std::sync::RwLock;

use crate::error::{MnemosyneError, Result};
use crate::models::Memory;
use crate::store::MemoryStore;

/// Process-local store. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    memories: RwLock<Vec<Memory>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memories(memories: Vec<Memory>) -> Self {
        Self {
            memories: RwLock::new(memories),
        }
    }
}

impl MemoryStore for InMemoryStore {
    fn load(&self) -> Vec<Memory> {
        match self.memories.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, memories: &[Memory]) -> Result<()> {
        let mut guard = self
            .memories
            .write()
            .map_err(|e| MnemosyneError::Internal(format!("store lock poisoned: {e}")))?;
        *guard = memories.to_vec();
        Ok(())
    }
}
