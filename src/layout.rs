//! Template dispatch and the positioned intermediate model.
//!
//! Each template gets its own module computing a [`Layout`]: nodes with
//! final coordinates and resolved visuals, plus edges with concrete anchor
//! points. The renderer turns that into output elements without doing any
//! geometry of its own.

mod architecture;
mod flowchart;
mod mindmap;

use crate::classify::ComponentType;
use crate::config::Config;
use crate::element::ShapeKind;
use crate::error::GenerateError;
use crate::graph::{DiagramKind, Graph};

/// A node with its final geometry and resolved visual style.
#[derive(Debug, Clone)]
pub struct PositionedNode {
    pub key: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: ShapeKind,
    pub stroke: String,
    pub fill: String,
    pub stroke_width: u32,
    pub stroke_style: String,
    pub font_size: f64,
    /// Set by the architecture template; other templates have no component
    /// semantics to classify.
    pub component: Option<ComponentType>,
}

/// An edge resolved to concrete start/end anchor points on its endpoints.
#[derive(Debug, Clone)]
pub struct PlacedEdge {
    pub source: String,
    pub target: String,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub gap: f64,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub kind: DiagramKind,
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PlacedEdge>,
}

/// Lay out a text description with the template selected by `kind`.
pub fn layout_description(
    kind: DiagramKind,
    description: &str,
    config: &Config,
) -> Result<Layout, GenerateError> {
    log::debug!("layout template={kind} from description");
    match kind {
        DiagramKind::Flowchart => flowchart::compute_flowchart_layout(description, config),
        DiagramKind::Architecture => {
            architecture::compute_architecture_layout_from_text(description, config)
        }
        DiagramKind::Mindmap => mindmap::compute_mindmap_layout(description, config),
    }
}

/// Lay out a pre-built graph. Only the architecture template understands
/// graph input; any other template is a usage error.
pub fn layout_graph(
    kind: DiagramKind,
    graph: &Graph,
    config: &Config,
) -> Result<Layout, GenerateError> {
    if kind != DiagramKind::Architecture {
        return Err(GenerateError::GraphInputUnsupported(kind));
    }
    log::debug!("layout template={kind} from graph ({} nodes)", graph.node_count());
    architecture::compute_architecture_layout(graph, config)
}
