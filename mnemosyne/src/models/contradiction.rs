use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::deserialize_optional_timestamp;
use super::Memory;

pub const CONTRADICTION_NOTES: &str =
    "Memories differ on the same topic and include opposing phrasing.";

/// Contradictions are recorded for the user and never auto-resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionStatus {
    #[default]
    Unresolved,
}

impl std::fmt::Display for ContradictionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Summary of one side of a contradiction. Only `memory_id` is required
/// when a report comes from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConflictingMemory {
    pub memory_id: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: String,
}

impl From<&Memory> for ConflictingMemory {
    fn from(memory: &Memory) -> Self {
        Self {
            memory_id: memory.id.clone(),
            created_at: Some(memory.created_at),
            content: memory.content.clone(),
        }
    }
}

/// One detected contradiction. Detection is pairwise, so a report normally
/// holds exactly two memories; reports supplied by callers may hold more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Contradiction {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub conflicting_memories: Vec<ConflictingMemory>,
    #[serde(default)]
    pub status: ContradictionStatus,
    #[serde(default)]
    pub notes: String,
}

impl Contradiction {
    pub fn between(topic: String, first: &Memory, second: &Memory) -> Self {
        Self {
            topic,
            conflicting_memories: vec![first.into(), second.into()],
            status: ContradictionStatus::Unresolved,
            notes: CONTRADICTION_NOTES.to_string(),
        }
    }

    pub fn memory_ids(&self) -> impl Iterator<Item = &str> {
        self.conflicting_memories.iter().map(|m| m.memory_id.as_str())
    }
}
