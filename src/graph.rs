use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::GenerateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Flowchart,
    Architecture,
    Mindmap,
}

impl DiagramKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "flowchart" | "flow" => Some(Self::Flowchart),
            "architecture" | "arch" => Some(Self::Architecture),
            "mindmap" | "mind" => Some(Self::Mindmap),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Architecture => "architecture",
            Self::Mindmap => "mindmap",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering bucket for the architecture template. Variant order is the
/// canonical top-to-bottom stacking order of the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Layer {
    Client,
    Edge,
    LoadBalancer,
    Gateway,
    #[default]
    Service,
    Cache,
    Queue,
    Database,
    Storage,
    Auth,
    Monitoring,
}

impl Layer {
    pub const ORDER: [Layer; 11] = [
        Layer::Client,
        Layer::Edge,
        Layer::LoadBalancer,
        Layer::Gateway,
        Layer::Service,
        Layer::Cache,
        Layer::Queue,
        Layer::Database,
        Layer::Storage,
        Layer::Auth,
        Layer::Monitoring,
    ];

    /// Accepts both our own layer names and the vocabulary emitted by the
    /// external project analyzer (`external`, `api`, `data`, `infra`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "client" | "external" | "frontend" => Some(Self::Client),
            "edge" | "cdn" => Some(Self::Edge),
            "load_balancer" | "lb" => Some(Self::LoadBalancer),
            "gateway" | "api" => Some(Self::Gateway),
            "service" | "app" | "backend" => Some(Self::Service),
            "cache" => Some(Self::Cache),
            "queue" | "infra" => Some(Self::Queue),
            "database" | "data" | "db" => Some(Self::Database),
            "storage" => Some(Self::Storage),
            "auth" => Some(Self::Auth),
            "monitoring" => Some(Self::Monitoring),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Edge => "edge",
            Self::LoadBalancer => "load_balancer",
            Self::Gateway => "gateway",
            Self::Service => "service",
            Self::Cache => "cache",
            Self::Queue => "queue",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Auth => "auth",
            Self::Monitoring => "monitoring",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub key: String,
    pub label: String,
    pub kind: String,
    pub layer: Layer,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

/// Immutable diagram graph. Construction validates key uniqueness; after
/// that the node set, insertion order, and edge list never change.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
    order: Vec<String>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GenerateError> {
        let mut map = BTreeMap::new();
        let mut order = Vec::with_capacity(nodes.len());
        for node in nodes {
            if map.contains_key(&node.key) {
                return Err(GenerateError::DuplicateNode(node.key));
            }
            order.push(node.key.clone());
            map.insert(node.key.clone(), node);
        }
        Ok(Self { nodes: map, order, edges })
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|key| self.nodes.get(key))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Keys of nodes with an edge pointing at `key`.
    pub fn parents<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.edges
            .iter()
            .filter(move |edge| edge.target == key)
            .map(|edge| edge.source.as_str())
    }
}

/// On-disk contract of the external analyzer: `{nodes: [...], edges: [...]}`.
/// Missing fields get the documented fallbacks (label from key, `service`
/// layer, empty kind) rather than failing the whole input.
#[derive(Debug, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
pub struct NodeRecord {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub layer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl GraphFile {
    pub fn into_graph(self) -> Result<Graph, GenerateError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|record| {
                let label = record
                    .label
                    .filter(|label| !label.is_empty())
                    .unwrap_or_else(|| record.key.clone());
                let layer = record
                    .layer
                    .as_deref()
                    .and_then(Layer::from_token)
                    .unwrap_or_default();
                Node {
                    key: record.key,
                    label,
                    kind: record.kind.unwrap_or_default(),
                    layer,
                }
            })
            .collect();
        let edges = self
            .edges
            .into_iter()
            .map(|record| Edge {
                source: record.source,
                target: record.target,
                label: record.label,
            })
            .collect();
        Graph::from_parts(nodes, edges)
    }
}
