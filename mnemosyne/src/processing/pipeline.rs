use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::intelligence::{ContradictionDetector, MemoryClassifier, RevisionDetector};
use crate::models::{parse_timestamp, Contradiction, IngestProfile, Memory, RevisionLink};

use super::segmenter::split_sentences;

/// Result of one ingestion call. Nothing here has been persisted yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IngestOutcome {
    pub new_memories: Vec<Memory>,
    pub revisions: Vec<RevisionLink>,
    pub contradictions: Vec<Contradiction>,
}

/// Turns raw text into memory records and cross-checks them against the
/// existing log.
#[derive(Debug, Clone, Default)]
pub struct IngestionPipeline {
    classifier: MemoryClassifier,
    revisions: RevisionDetector,
    contradictions: ContradictionDetector,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment, classify and link `text`.
    ///
    /// Revisions are searched only among `existing`; contradictions are
    /// searched over `existing` followed by the new memories, so new
    /// memories can contradict each other. Fails if `timestamp` is not
    /// ISO 8601.
    pub fn run(
        &self,
        text: &str,
        timestamp: &str,
        source: &str,
        existing: &[Memory],
        profile: IngestProfile,
    ) -> Result<IngestOutcome> {
        let created_at = parse_timestamp(timestamp)?;

        let mut new_memories = self.extract_new_memories(text, created_at, source, profile);
        let revisions = self.revisions.link_revisions(existing, &mut new_memories);

        let combined: Vec<Memory> = existing.iter().chain(new_memories.iter()).cloned().collect();
        let contradictions = self.contradictions.group_contradictions(&combined);

        tracing::debug!(
            new = new_memories.len(),
            revisions = revisions.len(),
            contradictions = contradictions.len(),
            %profile,
            "Ingestion pipeline finished"
        );

        Ok(IngestOutcome {
            new_memories,
            revisions,
            contradictions,
        })
    }

    /// One record per sentence that survives the profile filter. All records
    /// share `created_at`.
    pub fn extract_new_memories(
        &self,
        text: &str,
        created_at: DateTime<Utc>,
        source: &str,
        profile: IngestProfile,
    ) -> Vec<Memory> {
        split_sentences(text)
            .filter_map(|sentence| {
                let classification = self.classifier.classify(sentence);
                if !profile.keeps(classification.memory_type) {
                    tracing::trace!(%sentence, %profile, "Candidate dropped by profile");
                    return None;
                }
                Some(
                    Memory::new(
                        Uuid::new_v4().to_string(),
                        sentence.to_string(),
                        created_at,
                        classification.memory_type,
                        source.to_string(),
                    )
                    .with_confidence(classification.confidence)
                    .with_topics(classification.topics),
                )
            })
            .collect()
    }
}

/// Convenience wrapper around [`IngestionPipeline::run`].
pub fn ingest(
    text: &str,
    source: &str,
    timestamp: &str,
    existing: &[Memory],
    profile: IngestProfile,
) -> Result<IngestOutcome> {
    IngestionPipeline::new().run(text, timestamp, source, existing, profile)
}
