use crate::models::{Memory, RevisionLink};

use super::utils::topics_overlap;

/// Phrases in the new memory that on their own mark a revision.
const REVISION_PHRASES: &[&str] = &["no longer", "changed my mind", "but now"];

/// Whether `new` revises `old`, judged from the new memory's phrasing.
///
/// One-directional: only the new content is inspected for cues, except the
/// negation rule, which fires when the new content contains `not` and the old
/// one does not. All matches are plain substring checks.
pub fn detect_revision(old: &Memory, new: &Memory) -> bool {
    let old_text = old.content.to_lowercase();
    let new_text = new.content.to_lowercase();

    if REVISION_PHRASES.iter().any(|p| new_text.contains(p)) {
        return true;
    }
    if new_text.contains("used to") && new_text.contains("now") {
        return true;
    }
    if new_text.contains("previously") && new_text.contains("now") {
        return true;
    }
    new_text.contains("not") && !old_text.contains("not")
}

/// Links new memories to the first existing memory they revise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevisionDetector;

impl RevisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Set `revision_of` on each new memory that revises an existing one.
    ///
    /// Existing memories are scanned in store order and the first one with a
    /// topic overlap that passes [`detect_revision`] wins. Returns the links
    /// that were made.
    pub fn link_revisions(&self, existing: &[Memory], new_memories: &mut [Memory]) -> Vec<RevisionLink> {
        let mut links = Vec::new();

        for new in new_memories.iter_mut() {
            let target = existing
                .iter()
                .filter(|old| topics_overlap(&old.topics, &new.topics))
                .find(|old| detect_revision(old, new));

            if let Some(old) = target {
                tracing::debug!(memory_id = %new.id, revision_of = %old.id, "Linked revision");
                new.revision_of = Some(old.id.clone());
                links.push(RevisionLink {
                    memory_id: new.id.clone(),
                    revision_of: old.id.clone(),
                });
            }
        }

        links
    }
}
