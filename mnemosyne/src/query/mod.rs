//! Question answering over the memory log.
//!
//! Every call is stateless: detect the question's time mode, filter by time,
//! select by topic, rebuild revision chains and render four text sections.

pub mod render;
pub mod selection;
pub mod temporal;

use crate::models::Memory;

pub use selection::{build_revision_chains, select_relevant, RevisionChain};
pub use temporal::{extract_dates, TimeMode};

/// The four rendered sections of an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAnswer {
    pub mode: TimeMode,
    pub selected_ids: Vec<String>,
    pub answer: String,
    pub belief_evolution: String,
    pub memories_used: String,
    pub confidence_note: String,
}

impl std::fmt::Display for RenderedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "---")?;
        writeln!(f, "ANSWER:")?;
        writeln!(f, "{}", self.answer)?;
        writeln!(f)?;
        writeln!(f, "BELIEF EVOLUTION:")?;
        writeln!(f, "{}", self.belief_evolution)?;
        writeln!(f)?;
        writeln!(f, "MEMORIES USED:")?;
        writeln!(f, "{}", self.memories_used)?;
        writeln!(f)?;
        writeln!(f, "CONFIDENCE NOTE:")?;
        writeln!(f, "{}", self.confidence_note)?;
        write!(f, "---")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn answer(&self, memories: &[Memory], question: &str) -> RenderedAnswer {
        let mode = TimeMode::detect(question);
        let in_window = mode.filter(memories);
        let selected = select_relevant(&in_window, question);

        tracing::debug!(
            %mode,
            total = memories.len(),
            in_window = in_window.len(),
            selected = selected.len(),
            "Answering question"
        );

        RenderedAnswer {
            mode,
            selected_ids: selected.iter().map(|m| m.id.clone()).collect(),
            answer: render::answer_section(&selected, &mode),
            belief_evolution: render::belief_evolution_section(&selected),
            memories_used: render::memories_used_section(&selected, &mode),
            confidence_note: render::confidence_note(&selected),
        }
    }
}

/// Render the full answer text for `question` over `memories`.
pub fn answer_query(memories: &[Memory], question: &str) -> String {
    QueryEngine::new().answer(memories, question).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemoryType;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn memory(id: &str, content: &str, day: u32, topics: &[&str]) -> Memory {
        Memory::new(
            id.to_string(),
            content.to_string(),
            Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            MemoryType::Belief,
            "note".to_string(),
        )
        .with_confidence(0.9)
        .with_topics(topics.iter().copied())
    }

    #[test]
    fn test_empty_store_layout() {
        let text = answer_query(&[], "What do I think about rust?");
        let expected = "---\n\
ANSWER:\n\
I don't have enough memory to answer this confidently.\n\
\n\
BELIEF EVOLUTION:\n\
No significant belief change detected.\n\
\n\
MEMORIES USED:\n\
- None | N/A | N/A | No memory context was sufficient to answer.\n\
\n\
CONFIDENCE NOTE:\n\
Confidence is low. No relevant memories were found for the question. Additional, more specific memories would be required.\n\
---";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_topic_selection_with_fallback() {
        let memories = vec![
            memory("a", "Rust is fun.", 1, &["rust", "fun"]),
            memory("b", "Tea is good.", 2, &["tea", "good"]),
        ];

        let rendered = QueryEngine::new().answer(&memories, "Is rust worth it?");
        assert_eq!(rendered.selected_ids, vec!["a"]);

        let fallback = QueryEngine::new().answer(&memories, "What about gardening?");
        assert_eq!(fallback.selected_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_past_question_excludes_later_memories() {
        let memories = vec![
            memory("early", "Rust is hard.", 1, &["rust"]),
            memory("cutoff", "Rust is okay.", 5, &["rust"]),
            memory("late", "Rust is easy.", 9, &["rust"]),
        ];

        let rendered = QueryEngine::new().answer(&memories, "What did I think of rust as of 2024-03-05?");
        assert_eq!(rendered.mode.to_string(), "past");
        assert_eq!(rendered.selected_ids, vec!["early", "cutoff"]);
        assert!(rendered.memories_used.contains("Time-filtered relevant memory"));
    }

    #[test]
    fn test_ambiguous_question_asks_for_clarification() {
        let memories = vec![memory("a", "Rust is fun.", 1, &["rust"])];
        let text = answer_query(&memories, "What did I think about rust before the move?");
        assert!(text.contains("Clarifying question: Which exact date or time boundary should be applied?"));
        assert!(text.contains("- [2024-03-01T00:00:00Z] Rust is fun."));
    }
}
