use crate::models::MemoryType;

/// Cue phrases per type, checked in priority order. The first set with a
/// match decides the type.
const TYPE_CUES: &[(MemoryType, &[&str])] = &[
    (
        MemoryType::Belief,
        &["i believe", "i think", "i feel", "i assume"],
    ),
    (
        MemoryType::Decision,
        &["i decided", "i will", "i plan", "i intend"],
    ),
    (
        MemoryType::Reflection,
        &["i realized", "i noticed", "i reflected", "i am reflecting"],
    ),
];

const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "with", "for", "this", "that", "are", "is", "am", "i", "of", "in",
    "to", "a", "an",
];

/// Type, confidence and topics assigned to one candidate sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub memory_type: MemoryType,
    pub confidence: f64,
    pub topics: Vec<String>,
}

/// Keyword-heuristic classifier for candidate memories.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryClassifier;

impl MemoryClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, sentence: &str) -> Classification {
        Classification {
            memory_type: classify_memory_type(sentence),
            confidence: estimate_confidence(sentence),
            topics: extract_topics(sentence),
        }
    }
}

pub fn classify_memory_type(sentence: &str) -> MemoryType {
    let lower = sentence.to_lowercase();
    TYPE_CUES
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
        .map(|(memory_type, _)| *memory_type)
        .unwrap_or(MemoryType::Fact)
}

/// Step function over character length: medium-length statements score
/// highest, very short and very long ones are down-weighted.
pub fn estimate_confidence(sentence: &str) -> f64 {
    match sentence.chars().count() {
        0 => 0.0,
        n if n < 40 => 0.7,
        n if n < 200 => 0.9,
        _ => 0.6,
    }
}

/// Lowercase keyword tokens in first-seen order, without stop words,
/// tokens of two characters or fewer, or duplicates.
pub fn extract_topics(sentence: &str) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();

    let tokens = sentence
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase);

    for token in tokens {
        if token.chars().count() <= 2 || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        if !topics.contains(&token) {
            topics.push(token);
        }
    }

    topics
}
