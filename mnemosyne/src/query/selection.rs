use std::collections::{HashMap, HashSet};

use crate::models::Memory;

/// Memories with any topic appearing as a substring of the lowercased
/// question. Falls back to the whole input when nothing matches, so a topic
/// mismatch alone never empties the answer.
pub fn select_relevant<'a>(memories: &[&'a Memory], question: &str) -> Vec<&'a Memory> {
    let lower = question.to_lowercase();
    let selected: Vec<&Memory> = memories
        .iter()
        .copied()
        .filter(|m| m.topics.iter().any(|t| lower.contains(&t.to_lowercase())))
        .collect();

    if selected.is_empty() {
        memories.to_vec()
    } else {
        selected
    }
}

/// A revision chain: a root memory and every selected memory that revises
/// it directly or transitively, oldest first.
#[derive(Debug, Clone)]
pub struct RevisionChain<'a> {
    pub root_id: String,
    pub members: Vec<&'a Memory>,
}

impl<'a> RevisionChain<'a> {
    pub fn first(&self) -> Option<&'a Memory> {
        self.members.first().copied()
    }

    pub fn last(&self) -> Option<&'a Memory> {
        self.members.last().copied()
    }

    /// Chains of one memory narrate nothing.
    pub fn is_transition(&self) -> bool {
        self.members.len() >= 2
    }
}

/// Group `selected` into revision chains.
///
/// `revision_of` pointers are followed only through memories present in
/// `selected`. Chains appear in the order their first member appears in
/// `selected`, and each chain is sorted by `created_at` (stable).
pub fn build_revision_chains<'a>(selected: &[&'a Memory]) -> Vec<RevisionChain<'a>> {
    let by_id: HashMap<&str, &Memory> = selected.iter().map(|&m| (m.id.as_str(), m)).collect();

    let mut chains: Vec<RevisionChain<'a>> = Vec::new();
    let mut index_by_root: HashMap<String, usize> = HashMap::new();

    for &memory in selected {
        let root = find_root(memory, &by_id);
        let idx = *index_by_root.entry(root.to_string()).or_insert_with(|| {
            chains.push(RevisionChain {
                root_id: root.to_string(),
                members: Vec::new(),
            });
            chains.len() - 1
        });
        chains[idx].members.push(memory);
    }

    for chain in &mut chains {
        chain.members.sort_by_key(|m| m.created_at);
    }

    chains
}

fn find_root<'m>(memory: &'m Memory, by_id: &HashMap<&str, &'m Memory>) -> &'m str {
    let mut root = memory.id.as_str();
    let mut current = memory.revision_of.as_deref();
    let mut visited: HashSet<&str> = HashSet::from([root]);

    while let Some(parent) = current.and_then(|id| by_id.get(id).copied()) {
        if !visited.insert(parent.id.as_str()) {
            break;
        }
        root = parent.id.as_str();
        current = parent.revision_of.as_deref();
    }

    root
}
