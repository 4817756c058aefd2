use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::deserialize_timestamp;
use super::MemoryType;

/// One atomic statement in the memory log.
///
/// Records are immutable once appended; the only field set after
/// construction is `revision_of`, and only before the record is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Memory {
    #[serde(alias = "memory_id")]
    pub id: String,
    pub content: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub memory_type: MemoryType,
    pub confidence: f64,
    pub source: String,
    #[serde(alias = "topic", default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub revision_of: Option<String>,
}

impl Memory {
    pub fn new(
        id: String,
        content: String,
        created_at: DateTime<Utc>,
        memory_type: MemoryType,
        source: String,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            memory_type,
            confidence: 0.0,
            source,
            topics: Vec::new(),
            revision_of: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_revision_of(mut self, revision_of: impl Into<String>) -> Self {
        self.revision_of = Some(revision_of.into());
        self
    }

    /// Case-insensitive exact match against the topic set.
    pub fn has_topic(&self, topic: &str) -> bool {
        let wanted = topic.to_lowercase();
        self.topics.iter().any(|t| t.to_lowercase() == wanted)
    }
}

/// A link recorded when a new memory revises an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RevisionLink {
    pub memory_id: String,
    pub revision_of: String,
}
