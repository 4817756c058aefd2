use crate::models::{Contradiction, Memory};

use super::utils::{first_shared_topic, topics_overlap};

/// Opposing-phrasing markers. A pair contradicts when exactly one side
/// carries a marker.
const OPPOSING_MARKERS: &[&str] = &[" not ", "no longer"];

/// Whether two memories contradict each other.
///
/// Requires a shared topic and different content (case-insensitive), then
/// looks for a negation marker present in exactly one of the two. The
/// space-padded `" not "` only matches the standalone word.
pub fn detect_contradiction_pair(m1: &Memory, m2: &Memory) -> bool {
    if !topics_overlap(&m1.topics, &m2.topics) {
        return false;
    }

    let c1 = m1.content.to_lowercase();
    let c2 = m2.content.to_lowercase();
    if c1 == c2 {
        return false;
    }

    OPPOSING_MARKERS
        .iter()
        .any(|marker| c1.contains(marker) != c2.contains(marker))
}

/// Heuristic contradiction detector using pattern matching.
///
/// No semantic similarity is involved. Every unordered pair is tested and
/// each positive pair produces its own report, so `k` mutually
/// contradicting memories yield `k * (k - 1) / 2` reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContradictionDetector;

impl ContradictionDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn check_pair(&self, m1: &Memory, m2: &Memory) -> bool {
        detect_contradiction_pair(m1, m2)
    }

    /// Test every pair `(i, j)` with `i < j` in list order.
    pub fn group_contradictions(&self, memories: &[Memory]) -> Vec<Contradiction> {
        let mut contradictions = Vec::new();

        for (i, m1) in memories.iter().enumerate() {
            for m2 in &memories[i + 1..] {
                if !self.check_pair(m1, m2) {
                    continue;
                }
                let topic = first_shared_topic(&m1.topics, &m2.topics)
                    .unwrap_or("unspecified")
                    .to_string();
                tracing::debug!(first = %m1.id, second = %m2.id, %topic, "Contradiction detected");
                contradictions.push(Contradiction::between(topic, m1, m2));
            }
        }

        contradictions
    }
}
