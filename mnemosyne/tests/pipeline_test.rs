mod common;

use mnemosyne::intelligence::classifier::estimate_confidence;
use mnemosyne::models::{IngestProfile, MemoryType};
use mnemosyne::processing::{ingest, split_sentences};
use pretty_assertions::assert_eq;

const RAG_BELIEF: &str = "I believe RAG is the future of personal AI.";
const RAG_REVISION: &str = "I no longer believe RAG is the complete future of personal AI.";

#[test]
fn test_unterminated_text_is_a_single_segment() {
    for text in ["hello world", "  multiple   words here ", "ünïcödé text"] {
        let segments: Vec<&str> = split_sentences(text).collect();
        assert_eq!(segments.len(), 1, "{text:?}");
        assert!(!segments[0].is_empty());
    }
}

#[test]
fn test_confidence_step_boundaries() {
    let expected = [(0, 0.0), (39, 0.7), (40, 0.9), (199, 0.9), (200, 0.6)];
    for (len, confidence) in expected {
        assert_eq!(estimate_confidence(&"a".repeat(len)), confidence, "length {len}");
    }
}

#[test]
fn test_belief_and_decision_from_fresh_store() {
    let outcome = ingest(
        "I believe RAG is the future of personal AI. I decided to invest more time into it.",
        "note",
        "2024-01-10T09:00:00",
        &[],
        IngestProfile::Default,
    )
    .unwrap();

    let types: Vec<MemoryType> = outcome.new_memories.iter().map(|m| m.memory_type).collect();
    assert_eq!(types, vec![MemoryType::Belief, MemoryType::Decision]);
    assert!(outcome.revisions.is_empty());
}

#[test]
fn test_revision_and_contradiction_against_existing() {
    let first = ingest(RAG_BELIEF, "note", "2024-01-10T09:00:00", &[], IngestProfile::Default)
        .unwrap();
    let existing = first.new_memories;
    let old_id = existing[0].id.clone();

    let outcome = ingest(
        RAG_REVISION,
        "note",
        "2024-04-02T18:30:00",
        &existing,
        IngestProfile::Default,
    )
    .unwrap();

    assert_eq!(outcome.new_memories.len(), 1);
    assert_eq!(outcome.revisions.len(), 1);
    assert_eq!(outcome.revisions[0].revision_of, old_id);
    assert_eq!(outcome.revisions[0].memory_id, outcome.new_memories[0].id);
    assert_eq!(outcome.new_memories[0].revision_of.as_deref(), Some(old_id.as_str()));

    assert!(!outcome.contradictions.is_empty());
    let report = &outcome.contradictions[0];
    let ids: Vec<&str> = report.memory_ids().collect();
    assert_eq!(ids, vec![old_id.as_str(), outcome.new_memories[0].id.as_str()]);
    assert_eq!(report.topic, "believe");
}

#[test]
fn test_journal_profile_keeps_only_subjective_memories() {
    let outcome = ingest(
        "The sky was grey. I realized I was tired. I plan to sleep early.",
        "voice",
        "2024-02-01",
        &[],
        IngestProfile::Journal,
    )
    .unwrap();

    let types: Vec<MemoryType> = outcome.new_memories.iter().map(|m| m.memory_type).collect();
    assert_eq!(types, vec![MemoryType::Reflection, MemoryType::Decision]);
}
