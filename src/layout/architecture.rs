use std::collections::HashMap;

use crate::classify::{ComponentType, classify};
use crate::config::{Config, StyleMode};
use crate::element::ShapeKind;
use crate::error::GenerateError;
use crate::graph::{DiagramKind, Edge, Graph, Layer, Node};
use crate::parser::parse_architecture;

use super::{Layout, PlacedEdge, PositionedNode};

/// Text input: classify every component to pick its layer, turn the flow
/// chains into edges, then run the shared layered placement.
pub(super) fn compute_architecture_layout_from_text(
    description: &str,
    config: &Config,
) -> Result<Layout, GenerateError> {
    let parsed = parse_architecture(description);

    let nodes = parsed
        .components
        .iter()
        .map(|name| Node {
            key: name.clone(),
            label: name.clone(),
            kind: String::new(),
            layer: classify(name).component.layer(),
        })
        .collect();

    let mut edges = Vec::new();
    for flow in &parsed.flows {
        for pair in flow.windows(2) {
            for source in &pair[0] {
                for target in &pair[1] {
                    edges.push(Edge {
                        source: source.clone(),
                        target: target.clone(),
                        label: None,
                    });
                }
            }
        }
    }

    let graph = Graph::from_parts(nodes, edges)?;
    compute_architecture_layout(&graph, config)
}

/// Layered placement over an architecture graph.
///
/// Layers stack top to bottom in canonical order; within a layer nodes sit
/// on a grid centered against the widest layer, ordered by label. A node
/// whose parent is already placed in a prior layer takes the parent's x
/// instead of its grid slot, and collisions push it right until the minimum
/// sibling spacing holds.
pub(super) fn compute_architecture_layout(
    graph: &Graph,
    config: &Config,
) -> Result<Layout, GenerateError> {
    let arch = &config.layout.architecture;
    let theme = &config.theme;

    let mut layers: Vec<Vec<&Node>> = Vec::new();
    for layer in Layer::ORDER {
        let mut members: Vec<&Node> = graph.nodes().filter(|node| node.layer == layer).collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key)));
        layers.push(members);
    }

    let natural_width =
        |count: usize| count.saturating_sub(1) as f64 * arch.node_spacing + arch.node_width;
    let max_width = layers
        .iter()
        .map(|members| natural_width(members.len()))
        .fold(arch.node_width, f64::max);

    // Finished coordinates of prior layers, keyed by node; only these are
    // eligible as alignment parents.
    let mut placed: HashMap<String, (f64, f64)> = HashMap::new();
    let mut nodes_out = Vec::new();

    for (layer_idx, members) in layers.iter().enumerate() {
        let y = arch.y_start + layer_idx as f64 * arch.layer_spacing;
        let base_x = arch.x_start + (max_width - natural_width(members.len())) / 2.0;
        let mut row: Vec<(&Node, f64)> = Vec::new();

        for (idx, node) in members.iter().copied().enumerate() {
            let inherited = graph
                .parents(&node.key)
                .find_map(|parent| placed.get(parent).map(|&(x, _)| x));
            let mut x = inherited.unwrap_or(base_x + idx as f64 * arch.node_spacing);
            while row.iter().any(|&(_, rx)| (x - rx).abs() < arch.min_spacing) {
                x += arch.node_spacing;
            }
            row.push((node, x));
        }

        for (node, x) in row {
            placed.insert(node.key.clone(), (x, y));

            let class = if node.kind.is_empty() {
                classify(&node.label)
            } else {
                classify(&node.kind)
            };
            // Caches read as diamonds in layered diagrams.
            let shape = if class.component == ComponentType::Cache {
                ShapeKind::Diamond
            } else {
                class.shape
            };
            let (stroke, fill) = match config.style {
                StyleMode::Pro => (class.stroke.to_string(), class.fill.to_string()),
                StyleMode::Basic => (theme.stroke.clone(), theme.background.clone()),
            };
            log::debug!(
                "placed {key} as {component} at ({x}, {y})",
                key = node.key,
                component = class.component.as_str()
            );

            nodes_out.push(PositionedNode {
                key: node.key.clone(),
                label: node.label.clone(),
                x,
                y,
                width: arch.node_width,
                height: arch.node_height,
                shape,
                stroke,
                fill,
                stroke_width: 2,
                stroke_style: "solid".to_string(),
                font_size: arch.font_size,
                component: Some(class.component),
            });
        }
    }

    let mut edges_out = Vec::new();
    for edge in graph.edges() {
        if edge.source == edge.target {
            continue;
        }
        let Some(&(sx, sy)) = placed.get(&edge.source) else {
            if config.layout.strict_edges {
                return Err(GenerateError::DanglingEdge(edge.source.clone()));
            }
            log::debug!("dropping edge with unknown source {}", edge.source);
            continue;
        };
        let Some(&(tx, ty)) = placed.get(&edge.target) else {
            if config.layout.strict_edges {
                return Err(GenerateError::DanglingEdge(edge.target.clone()));
            }
            log::debug!("dropping edge with unknown target {}", edge.target);
            continue;
        };

        // Bottom-center of the source, top-center of the target: the diagram
        // reads top to bottom.
        edges_out.push(PlacedEdge {
            source: edge.source.clone(),
            target: edge.target.clone(),
            start: (sx + arch.node_width / 2.0, sy + arch.node_height),
            end: (tx + arch.node_width / 2.0, ty),
            gap: arch.arrow_gap,
        });
    }

    Ok(Layout {
        kind: DiagramKind::Architecture,
        nodes: nodes_out,
        edges: edges_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: &str, layer: Layer) -> Node {
        Node {
            key: key.to_string(),
            label: key.to_string(),
            kind: String::new(),
            layer,
        }
    }

    fn edge(source: &str, target: &str) -> Edge {
        Edge {
            source: source.to_string(),
            target: target.to_string(),
            label: None,
        }
    }

    #[test]
    fn chain_stacks_by_layer_and_aligns_under_parent() {
        let config = Config::default();
        let layout = compute_architecture_layout_from_text(
            "Load Balancer -> API Gateway -> Cache -> Database",
            &config,
        )
        .unwrap();

        let keys: Vec<&str> = layout.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, ["Load Balancer", "API Gateway", "Cache", "Database"]);

        // Each node one layer lower than its parent, same column.
        for pair in layout.nodes.windows(2) {
            assert!(pair[0].y < pair[1].y);
            assert_eq!(pair[0].x, pair[1].x);
        }
        assert_eq!(layout.edges.len(), 3);
    }

    #[test]
    fn cache_is_a_diamond_database_an_ellipse() {
        let layout = compute_architecture_layout_from_text("Cache -> Database", &Config::default())
            .unwrap();
        assert_eq!(layout.nodes[0].shape, ShapeKind::Diamond);
        assert_eq!(layout.nodes[0].stroke, "#dc2626");
        assert_eq!(layout.nodes[1].shape, ShapeKind::Ellipse);
        assert_eq!(layout.nodes[1].stroke, "#7c3aed");
    }

    #[test]
    fn basic_style_uses_theme_palette() {
        let mut config = Config::default();
        config.style = StyleMode::Basic;
        let layout =
            compute_architecture_layout_from_text("Cache -> Database", &config).unwrap();
        assert!(layout.nodes.iter().all(|n| n.stroke == config.theme.stroke));
    }

    #[test]
    fn siblings_inheriting_one_parent_keep_min_spacing() {
        let nodes = vec![
            node("api", Layer::Service),
            node("redis", Layer::Cache),
            node("memcached", Layer::Cache),
        ];
        let edges = vec![edge("api", "redis"), edge("api", "memcached")];
        let graph = Graph::from_parts(nodes, edges).unwrap();
        let config = Config::default();
        let layout = compute_architecture_layout(&graph, &config).unwrap();

        let cache_xs: Vec<f64> = layout
            .nodes
            .iter()
            .filter(|n| n.y > layout.nodes[0].y)
            .map(|n| n.x)
            .collect();
        assert_eq!(cache_xs.len(), 2);
        assert!((cache_xs[0] - cache_xs[1]).abs() >= config.layout.architecture.min_spacing);
    }

    #[test]
    fn dangling_edge_dropped_by_default() {
        let graph = Graph::from_parts(
            vec![node("a", Layer::Service), node("b", Layer::Service)],
            vec![edge("a", "c")],
        )
        .unwrap();
        let layout = compute_architecture_layout(&graph, &Config::default()).unwrap();
        assert_eq!(layout.nodes.len(), 2);
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn dangling_edge_fails_in_strict_mode() {
        let graph = Graph::from_parts(
            vec![node("a", Layer::Service)],
            vec![edge("a", "missing")],
        )
        .unwrap();
        let mut config = Config::default();
        config.layout.strict_edges = true;
        let result = compute_architecture_layout(&graph, &config);
        assert!(matches!(
            result,
            Err(GenerateError::DanglingEdge(key)) if key == "missing"
        ));
    }

    #[test]
    fn absent_layers_are_skipped() {
        let graph = Graph::from_parts(
            vec![node("web", Layer::Client), node("db", Layer::Database)],
            Vec::new(),
        )
        .unwrap();
        let config = Config::default();
        let layout = compute_architecture_layout(&graph, &config).unwrap();
        // Two occupied layers land on consecutive rows.
        assert_eq!(
            layout.nodes[1].y - layout.nodes[0].y,
            config.layout.architecture.layer_spacing
        );
    }

    #[test]
    fn arrows_run_bottom_center_to_top_center() {
        let layout =
            compute_architecture_layout_from_text("API -> Database", &Config::default()).unwrap();
        let edge = &layout.edges[0];
        let source = &layout.nodes[0];
        let target = &layout.nodes[1];
        assert_eq!(edge.start.0, source.x + source.width / 2.0);
        assert_eq!(edge.start.1, source.y + source.height);
        assert_eq!(edge.end.0, target.x + target.width / 2.0);
        assert_eq!(edge.end.1, target.y);
    }
}
