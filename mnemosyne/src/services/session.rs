use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{format_timestamp, Memory, MemoryType};
use crate::query::answer_query;

pub const SESSION_SOURCE: &str = "session";
pub const SESSION_CONFIDENCE: f64 = 0.8;

/// Optional time window for a thinking session. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl SessionRange {
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| *at >= start) && self.end.map_or(true, |end| *at <= end)
    }
}

/// Rendered answer plus the reflection memory to append for it.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ThinkingSession {
    pub answer: String,
    pub summary_memory: Memory,
}

/// Memories with a topic equal to, or containing, `topic` (case-insensitive).
pub fn filter_by_topic<'a>(memories: &'a [Memory], topic: &str) -> Vec<&'a Memory> {
    let wanted = topic.to_lowercase();
    memories
        .iter()
        .filter(|m| {
            m.topics
                .iter()
                .map(|t| t.to_lowercase())
                .any(|t| t == wanted || t.contains(&wanted))
        })
        .collect()
}

/// Run a thinking session over `memories` without touching any store.
pub fn run_thinking_session(
    topic: &str,
    memories: &[Memory],
    range: &SessionRange,
    now: DateTime<Utc>,
) -> ThinkingSession {
    let scoped: Vec<Memory> = filter_by_topic(memories, topic)
        .into_iter()
        .filter(|m| !range.is_bounded() || range.contains(&m.created_at))
        .cloned()
        .collect();

    tracing::debug!(topic, matched = scoped.len(), "Running thinking session");

    let answer = answer_query(&scoped, &format!("How has my thinking about {topic} evolved?"));

    let stamp = format_timestamp(&now);
    let summary_memory = Memory::new(
        format!("session-{stamp}"),
        format!("Thinking session summary for topic '{topic}' at {stamp}."),
        now,
        MemoryType::Reflection,
        SESSION_SOURCE.to_string(),
    )
    .with_confidence(SESSION_CONFIDENCE)
    .with_topics([topic.to_lowercase()]);

    ThinkingSession {
        answer,
        summary_memory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn memory(id: &str, day: u32, topics: &[&str]) -> Memory {
        Memory::new(
            id.to_string(),
            format!("Thought {id}."),
            Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            MemoryType::Belief,
            "note".to_string(),
        )
        .with_confidence(0.9)
        .with_topics(topics.iter().copied())
    }

    #[test]
    fn test_topic_filter_matches_substrings() {
        let memories = vec![
            memory("a", 1, &["rust"]),
            memory("b", 2, &["rustacean"]),
            memory("c", 3, &["tea"]),
        ];
        let ids: Vec<&str> = filter_by_topic(&memories, "Rust")
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_summary_memory_shape() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let session = run_thinking_session("Rust", &[], &SessionRange::default(), now);

        let summary = &session.summary_memory;
        assert_eq!(summary.id, "session-2024-06-01T12:00:00Z");
        assert_eq!(
            summary.content,
            "Thinking session summary for topic 'Rust' at 2024-06-01T12:00:00Z."
        );
        assert_eq!(summary.memory_type, MemoryType::Reflection);
        assert_eq!(summary.confidence, 0.8);
        assert_eq!(summary.source, "session");
        assert_eq!(summary.topics, vec!["rust"]);
        assert_eq!(summary.revision_of, None);
        assert!(session
            .answer
            .contains("I don't have enough memory to answer this confidently."));
    }

    #[test]
    fn test_range_restricts_memories() {
        let memories = vec![
            memory("a", 1, &["rust"]),
            memory("b", 10, &["rust"]),
            memory("c", 20, &["rust"]),
        ];
        let range = SessionRange {
            start: Some(Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap()),
            end: None,
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let session = run_thinking_session("rust", &memories, &range, now);
        assert!(!session.answer.contains("Thought a."));
        assert!(session.answer.contains("Thought b."));
        assert!(session.answer.contains("Thought c."));
    }
}
