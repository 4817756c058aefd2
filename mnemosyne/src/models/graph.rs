use serde::{Deserialize, Serialize};

use super::Metadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GraphNodeType {
    Memory,
    Topic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GraphEdgeType {
    /// memory -> topic
    About,
    /// revising memory -> revised memory
    Revises,
    /// memory <-> memory, one edge per detected pair
    Contradicts,
}

/// A node in the belief graph
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GraphNode {
    /// Memory id, or `topic:<name>` for topic nodes
    pub id: String,

    #[serde(rename = "type")]
    pub node_type: GraphNodeType,

    /// Display fields (timestamps, labels, confidence)
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

impl GraphNode {
    pub fn with_metadata(id: String, node_type: GraphNodeType, metadata: Metadata) -> Self {
        Self {
            id,
            node_type,
            metadata,
        }
    }
}

/// An edge in the belief graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,

    #[serde(rename = "type")]
    pub edge_type: GraphEdgeType,
}

impl GraphEdge {
    pub fn new(source: String, target: String, edge_type: GraphEdgeType) -> Self {
        Self {
            source,
            target,
            edge_type,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BeliefGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl BeliefGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    pub fn edges_of_type(&self, edge_type: GraphEdgeType) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.edge_type == edge_type)
    }
}
