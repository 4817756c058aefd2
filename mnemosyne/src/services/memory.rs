use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{MnemosyneError, Result};
use crate::intelligence::ContradictionDetector;
use crate::models::{
    format_timestamp, parse_timestamp, BeliefGraph, Contradiction, IngestProfile, Memory,
    RevisionLink,
};
use crate::processing::IngestionPipeline;
use crate::query::QueryEngine;
use crate::services::analytics::{build_belief_graph, build_timeline};
use crate::services::session::{run_thinking_session, SessionRange, ThinkingSession};
use crate::store::{JsonFileStore, MemoryStore};

pub const EMPTY_STORE_ANSWER: &str = "No memories available in the store.";

#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    pub text: String,
    pub source: String,
    /// ISO 8601. Absent or empty means now.
    pub timestamp: Option<String>,
    /// Falls back to the service's configured profile.
    pub profile: Option<IngestProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IngestSummary {
    pub new_memories: Vec<Memory>,
    pub revisions: Vec<RevisionLink>,
    pub contradictions: Vec<Contradiction>,
    pub total_memories: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnswerResponse {
    pub has_memories: bool,
    pub answer: String,
}

/// Orchestrates ingestion, answering and analytics over one store.
///
/// Write paths hold `write_lock` for their whole read-modify-write cycle.
pub struct MemoryService {
    store: Arc<dyn MemoryStore>,
    pipeline: IngestionPipeline,
    contradictions: ContradictionDetector,
    engine: QueryEngine,
    default_profile: IngestProfile,
    snapshot_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl MemoryService {
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self {
            store,
            pipeline: IngestionPipeline::new(),
            contradictions: ContradictionDetector::new(),
            engine: QueryEngine::new(),
            default_profile: IngestProfile::Default,
            snapshot_dir: PathBuf::from("data/snapshots"),
            write_lock: Mutex::new(()),
        }
    }

    /// Service over the JSON file store named in `config`.
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(JsonFileStore::new(config.store.path.clone()));
        Self::new(store)
            .with_default_profile(config.ingest.default_profile)
            .with_snapshot_dir(config.store.snapshot_dir.clone())
    }

    pub fn with_default_profile(mut self, profile: IngestProfile) -> Self {
        self.default_profile = profile;
        self
    }

    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    pub fn ingest(&self, request: IngestRequest) -> Result<IngestSummary> {
        if request.text.trim().is_empty() || request.source.trim().is_empty() {
            return Err(MnemosyneError::Validation(
                "Fields 'text' and 'source' are required.".to_string(),
            ));
        }

        let timestamp = request
            .timestamp
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format_timestamp(&Utc::now()));
        let profile = request.profile.unwrap_or(self.default_profile);

        let _guard = self.lock_writes();
        let existing = self.store.load();
        let outcome = self.pipeline.run(
            &request.text,
            &timestamp,
            &request.source,
            &existing,
            profile,
        )?;
        let combined = self.store.append(&outcome.new_memories)?;

        tracing::info!(
            source = %request.source,
            %profile,
            added = outcome.new_memories.len(),
            total = combined.len(),
            "Ingested text"
        );

        Ok(IngestSummary {
            new_memories: outcome.new_memories,
            revisions: outcome.revisions,
            contradictions: outcome.contradictions,
            total_memories: combined.len(),
        })
    }

    pub fn answer(&self, question: &str) -> Result<AnswerResponse> {
        if question.trim().is_empty() {
            return Err(MnemosyneError::Validation(
                "Field 'question' is required.".to_string(),
            ));
        }

        let memories = self.store.load();
        if memories.is_empty() {
            return Ok(AnswerResponse {
                has_memories: false,
                answer: EMPTY_STORE_ANSWER.to_string(),
            });
        }

        Ok(AnswerResponse {
            has_memories: true,
            answer: self.engine.answer(&memories, question).to_string(),
        })
    }

    /// Answer over caller-supplied memories without touching the store.
    ///
    /// An empty list is answered like any other, with the insufficient-memory
    /// layout rather than the empty-store message.
    pub fn answer_over(&self, memories: &[Memory], question: &str) -> Result<AnswerResponse> {
        if question.trim().is_empty() {
            return Err(MnemosyneError::Validation(
                "Field 'question' is required.".to_string(),
            ));
        }

        Ok(AnswerResponse {
            has_memories: !memories.is_empty(),
            answer: self.engine.answer(memories, question).to_string(),
        })
    }

    /// Answer how thinking on `topic` evolved and append the session's
    /// summary reflection.
    pub fn thinking_session(
        &self,
        topic: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<ThinkingSession> {
        if topic.trim().is_empty() {
            return Err(MnemosyneError::Validation(
                "Field 'topic' is required.".to_string(),
            ));
        }

        let range = SessionRange {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        };

        let _guard = self.lock_writes();
        let memories = self.store.load();
        let session = run_thinking_session(topic, &memories, &range, Utc::now());
        self.store
            .append(std::slice::from_ref(&session.summary_memory))?;

        tracing::info!(topic, id = %session.summary_memory.id, "Recorded thinking session");
        Ok(session)
    }

    /// Belief graph over the store. Contradictions are detected over the
    /// stored memories unless supplied.
    pub fn graph(&self, contradictions: Option<Vec<Contradiction>>) -> BeliefGraph {
        let memories = self.store.load();
        let contradictions =
            contradictions.unwrap_or_else(|| self.contradictions.group_contradictions(&memories));
        build_belief_graph(&memories, &contradictions)
    }

    pub fn timeline(&self, topic: Option<&str>) -> Vec<Memory> {
        build_timeline(&self.store.load(), topic)
    }

    pub fn list(&self) -> Vec<Memory> {
        self.store.load()
    }

    pub fn get(&self, id: &str) -> Result<Memory> {
        self.store
            .load()
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| MnemosyneError::NotFound(format!("Memory {id} not found")))
    }

    /// Snapshot the store into `dir`, or the configured snapshot directory.
    pub fn snapshot(&self, dir: Option<&Path>) -> Result<Option<PathBuf>> {
        let _guard = self.lock_writes();
        self.store
            .snapshot(dir.unwrap_or(self.snapshot_dir.as_path()))
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn parse_bound(value: Option<&str>) -> Result<Option<chrono::DateTime<Utc>>> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_timestamp)
        .transpose()
}
