use std::collections::HashMap;

use serde_json::json;

use crate::models::{
    format_timestamp, BeliefGraph, Contradiction, GraphEdge, GraphEdgeType, GraphNode,
    GraphNodeType, Memory, Metadata,
};

/// Build the belief graph over `memories`.
///
/// Topic nodes come first in first-seen order, then one node per memory id.
/// Edges: `about` from each memory to each of its topics, `revises` from a
/// revising memory to its target, and one `contradicts` edge per pair of
/// memories within each contradiction report.
pub fn build_belief_graph(memories: &[Memory], contradictions: &[Contradiction]) -> BeliefGraph {
    let mut topic_nodes: Vec<GraphNode> = Vec::new();
    let mut topic_index: HashMap<&str, usize> = HashMap::new();
    let mut memory_nodes: Vec<GraphNode> = Vec::new();
    let mut memory_index: HashMap<&str, usize> = HashMap::new();
    let mut edges: Vec<GraphEdge> = Vec::new();

    for memory in memories {
        let node = GraphNode::with_metadata(
            memory.id.clone(),
            GraphNodeType::Memory,
            memory_metadata(memory),
        );
        // A repeated id keeps its first position and the latest fields.
        match memory_index.get(memory.id.as_str()) {
            Some(&idx) => memory_nodes[idx] = node,
            None => {
                memory_index.insert(memory.id.as_str(), memory_nodes.len());
                memory_nodes.push(node);
            }
        }

        for topic in &memory.topics {
            let topic_id = topic_node_id(topic);
            if !topic_index.contains_key(topic.as_str()) {
                topic_index.insert(topic.as_str(), topic_nodes.len());
                let mut metadata = Metadata::new();
                metadata.insert("label".to_string(), json!(topic));
                topic_nodes.push(GraphNode::with_metadata(
                    topic_id.clone(),
                    GraphNodeType::Topic,
                    metadata,
                ));
            }
            edges.push(GraphEdge::new(memory.id.clone(), topic_id, GraphEdgeType::About));
        }

        if let Some(target) = &memory.revision_of {
            edges.push(GraphEdge::new(
                memory.id.clone(),
                target.clone(),
                GraphEdgeType::Revises,
            ));
        }
    }

    for contradiction in contradictions {
        let ids: Vec<&str> = contradiction.memory_ids().collect();
        for (i, source) in ids.iter().enumerate() {
            for target in &ids[i + 1..] {
                edges.push(GraphEdge::new(
                    source.to_string(),
                    target.to_string(),
                    GraphEdgeType::Contradicts,
                ));
            }
        }
    }

    let mut graph = BeliefGraph::new();
    topic_nodes
        .into_iter()
        .chain(memory_nodes)
        .for_each(|node| graph.add_node(node));
    edges.into_iter().for_each(|edge| graph.add_edge(edge));
    graph
}

pub fn topic_node_id(topic: &str) -> String {
    format!("topic:{topic}")
}

fn memory_metadata(memory: &Memory) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(
        "created_at".to_string(),
        json!(format_timestamp(&memory.created_at)),
    );
    metadata.insert("memory_type".to_string(), json!(memory.memory_type));
    metadata.insert("confidence".to_string(), json!(memory.confidence));
    metadata.insert("topics".to_string(), json!(memory.topics));
    metadata
}

/// Memories in ascending `created_at` order, optionally restricted to one
/// topic (case-insensitive exact match). Ties keep store order.
pub fn build_timeline(memories: &[Memory], topic: Option<&str>) -> Vec<Memory> {
    let topic = topic.map(str::trim).filter(|t| !t.is_empty());
    let mut items: Vec<Memory> = memories
        .iter()
        .filter(|m| topic.map_or(true, |t| m.has_topic(t)))
        .cloned()
        .collect();
    items.sort_by_key(|m| m.created_at);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemoryType;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn memory(id: &str, day: u32, topics: &[&str]) -> Memory {
        Memory::new(
            id.to_string(),
            format!("Memory {id}."),
            Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            MemoryType::Belief,
            "note".to_string(),
        )
        .with_confidence(0.9)
        .with_topics(topics.iter().copied())
    }

    #[test]
    fn test_graph_nodes_topics_first() {
        let memories = vec![
            memory("a", 1, &["rust", "tools"]),
            memory("b", 2, &["rust"]).with_revision_of("a"),
        ];
        let graph = build_belief_graph(&memories, &[]);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["topic:rust", "topic:tools", "a", "b"]);
        assert_eq!(graph.nodes[0].metadata["label"], "rust");
        assert_eq!(graph.nodes[2].metadata["memory_type"], "belief");

        assert_eq!(graph.edges_of_type(GraphEdgeType::About).count(), 3);
        let revises: Vec<&GraphEdge> = graph.edges_of_type(GraphEdgeType::Revises).collect();
        assert_eq!(revises.len(), 1);
        assert_eq!((revises[0].source.as_str(), revises[0].target.as_str()), ("b", "a"));
    }

    #[test]
    fn test_graph_contradiction_edges() {
        let a = memory("a", 1, &["coffee"]);
        let b = memory("b", 2, &["coffee"]);
        let report = Contradiction::between("coffee".to_string(), &a, &b);

        let graph = build_belief_graph(&[a, b], &[report]);
        let edges: Vec<&GraphEdge> = graph.edges_of_type(GraphEdgeType::Contradicts).collect();
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].source.as_str(), edges[0].target.as_str()), ("a", "b"));
    }

    #[test]
    fn test_timeline_sorted_and_filtered() {
        let memories = vec![
            memory("late", 9, &["rust"]),
            memory("early", 1, &["tea"]),
            memory("mid", 5, &["Rust"]),
        ];

        let all: Vec<String> = build_timeline(&memories, None).into_iter().map(|m| m.id).collect();
        assert_eq!(all, vec!["early", "mid", "late"]);

        let rust: Vec<String> = build_timeline(&memories, Some("RUST"))
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(rust, vec!["mid", "late"]);

        assert_eq!(build_timeline(&memories, Some("   ")).len(), 3);
        assert!(build_timeline(&memories, Some("ru")).is_empty());
    }
}
