use crate::models::{format_timestamp, Memory};

use super::selection::build_revision_chains;
use super::TimeMode;

pub const INSUFFICIENT_MEMORY: &str = "I don't have enough memory to answer this confidently.";
pub const NO_BELIEF_CHANGE: &str = "No significant belief change detected.";
pub const NO_MEMORIES_USED: &str =
    "- None | N/A | N/A | No memory context was sufficient to answer.";
pub const LOW_CONFIDENCE_EMPTY: &str = "Confidence is low. No relevant memories were found for the question. Additional, more specific memories would be required.";

pub fn answer_section(selected: &[&Memory], mode: &TimeMode) -> String {
    if selected.is_empty() {
        return INSUFFICIENT_MEMORY.to_string();
    }

    let mut lines: Vec<String> = match mode {
        TimeMode::Past { .. } => {
            vec!["Answer is based on memories available up to the requested time.".to_string()]
        }
        TimeMode::Range { .. } => {
            vec!["Answer is based on memories within the requested time range.".to_string()]
        }
        TimeMode::PastAmbiguous => vec![
            "Time reference in the question is ambiguous; using all available memories."
                .to_string(),
            "Clarifying question: Which exact date or time boundary should be applied?"
                .to_string(),
        ],
        TimeMode::Present => {
            vec!["Answer is based on the latest available relevant memories.".to_string()]
        }
    };

    lines.extend(
        selected
            .iter()
            .map(|m| format!("- [{}] {}", format_timestamp(&m.created_at), m.content)),
    );
    lines.join("\n")
}

/// One "is revised by" line per chain of two or more memories.
pub fn belief_evolution_section(selected: &[&Memory]) -> String {
    let lines: Vec<String> = build_revision_chains(selected)
        .iter()
        .filter(|chain| chain.is_transition())
        .filter_map(|chain| Some((chain.first()?, chain.last()?)))
        .map(|(first, last)| {
            let topics = if last.topics.is_empty() {
                "unspecified topics".to_string()
            } else {
                last.topics.join(", ")
            };
            format!(
                "For {topics}, memory {} ({}) is revised by {} ({}).",
                first.id,
                format_timestamp(&first.created_at),
                last.id,
                format_timestamp(&last.created_at)
            )
        })
        .collect();

    if lines.is_empty() {
        NO_BELIEF_CHANGE.to_string()
    } else {
        lines.join("\n")
    }
}

pub fn memories_used_section(selected: &[&Memory], mode: &TimeMode) -> String {
    if selected.is_empty() {
        return NO_MEMORIES_USED.to_string();
    }

    let base_reason = if mode.is_time_scoped() {
        "Time-filtered relevant memory"
    } else {
        "Relevant memory"
    };

    selected
        .iter()
        .map(|m| {
            let reason = if m.topics.is_empty() {
                base_reason.to_string()
            } else {
                format!("{base_reason} for topics {}", m.topics.join(", "))
            };
            format!(
                "- {} | {} | {:.2} | {}",
                m.id,
                format_timestamp(&m.created_at),
                m.confidence,
                reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Qualitative confidence bucket for a mean confidence value.
pub fn confidence_level(average: f64) -> &'static str {
    if average >= 0.75 {
        "high"
    } else if average >= 0.4 {
        "moderate"
    } else {
        "low"
    }
}

pub fn confidence_note(selected: &[&Memory]) -> String {
    if selected.is_empty() {
        return LOW_CONFIDENCE_EMPTY.to_string();
    }

    let average = selected.iter().map(|m| m.confidence).sum::<f64>() / selected.len() as f64;
    format!(
        "Confidence is {}. This reflects the average confidence value of the selected memories ({:.2}) and their direct relevance to the question.",
        confidence_level(average),
        average
    )
}
