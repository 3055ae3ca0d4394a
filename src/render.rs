//! Conversion of a computed layout into output elements.
//!
//! Every node becomes a shape plus a centered label sharing one group id;
//! every placed edge becomes an arrow whose bindings reference the endpoint
//! shapes. All geometry was settled by the layout stage; this stage only
//! mints identities and packs records.

use std::collections::{HashMap, HashSet};

use crate::config::{Config, StyleMode};
use crate::element::{ArrowProps, Binding, Element, ElementCommon, TextProps};
use crate::layout::{Layout, PositionedNode};
use crate::library::ComponentLibrary;
use crate::theme::Theme;

/// Crude but format-stable label width estimate: half the font size per
/// character. Kept in place of real text metrics so output geometry matches
/// the consuming tool's expectations.
fn estimated_text_width(label: &str, font_size: f64) -> f64 {
    label.chars().count() as f64 * font_size / 2.0
}

pub fn render_elements(
    layout: &Layout,
    config: &Config,
    library: Option<&dyn ComponentLibrary>,
) -> Vec<Element> {
    let theme = &config.theme;
    let mut elements = Vec::new();
    // node key -> id of the element arrows bind to
    let mut anchors: HashMap<String, String> = HashMap::new();

    for node in &layout.nodes {
        let fragment = match (library, node.component) {
            (Some(library), Some(component)) if config.style == StyleMode::Pro => {
                library.find_for_type(component)
            }
            _ => None,
        };

        let (group_id, anchor_id) = match fragment {
            Some(fragment) => {
                let (_, _, fragment_width, fragment_height) = fragment.bounds();
                let scale =
                    (node.width / fragment_width.max(1.0)).min(node.height / fragment_height.max(1.0));
                let instance = fragment.instantiate(node.x, node.y, scale, theme);
                if instance.elements.is_empty() {
                    emit_shape(node, theme, &mut elements)
                } else {
                    log::debug!("substituted library fragment {} for {}", fragment.name, node.key);
                    elements.extend(instance.elements);
                    (instance.group_id, instance.anchor_id)
                }
            }
            None => emit_shape(node, theme, &mut elements),
        };

        emit_label(node, &group_id, theme, &mut elements);
        anchors.insert(node.key.clone(), anchor_id);
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    for edge in &layout.edges {
        let Some(start_id) = anchors.get(&edge.source) else {
            continue;
        };
        let Some(end_id) = anchors.get(&edge.target) else {
            continue;
        };
        if start_id == end_id {
            continue;
        }
        if !seen.insert((start_id.clone(), end_id.clone())) {
            continue;
        }

        let (dx, dy) = (edge.end.0 - edge.start.0, edge.end.1 - edge.start.1);
        let mut common = ElementCommon::new(edge.start.0, edge.start.1, dx.abs(), dy.abs());
        common.stroke_color = theme.line.clone();
        common.roughness = theme.roughness;

        elements.push(Element::Arrow {
            common,
            arrow: ArrowProps {
                points: vec![[0.0, 0.0], [dx, dy]],
                last_committed_point: [dx, dy],
                start_binding: Some(Binding {
                    element_id: start_id.clone(),
                    focus: 0.5,
                    gap: edge.gap,
                }),
                end_binding: Some(Binding {
                    element_id: end_id.clone(),
                    focus: 0.5,
                    gap: edge.gap,
                }),
                start_arrowhead: None,
                end_arrowhead: Some("arrow".to_string()),
            },
        });
    }

    elements
}

/// Primitive shape for a node. The shape's own id doubles as the group id
/// binding it to its label.
fn emit_shape(node: &PositionedNode, theme: &Theme, elements: &mut Vec<Element>) -> (String, String) {
    let mut common = ElementCommon::new(node.x, node.y, node.width, node.height);
    common.stroke_color = node.stroke.clone();
    common.background_color = node.fill.clone();
    common.fill_style = theme.fill_style.clone();
    common.stroke_width = node.stroke_width;
    common.stroke_style = node.stroke_style.clone();
    common.roughness = theme.roughness;

    let id = common.id.clone();
    common.group_ids = vec![id.clone()];
    elements.push(Element::shape(node.shape, common));
    (id.clone(), id)
}

fn emit_label(node: &PositionedNode, group_id: &str, theme: &Theme, elements: &mut Vec<Element>) {
    let estimated = estimated_text_width(&node.label, node.font_size);
    let mut common = ElementCommon::new(
        node.x + (node.width - estimated) / 2.0,
        node.y + node.height / 2.0 - 10.0,
        node.width - 20.0,
        20.0,
    );
    common.stroke_color = node.stroke.clone();
    common.background_color = "transparent".to_string();
    common.roughness = theme.roughness;
    common.group_ids = vec![group_id.to_string()];

    elements.push(Element::Text {
        common,
        text: TextProps {
            text: node.label.clone(),
            font_size: node.font_size,
            font_family: theme.font_family,
            text_align: "center".to_string(),
            vertical_align: "middle".to_string(),
            container_id: None,
            original_text: node.label.clone(),
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ComponentType;
    use crate::element::ShapeKind;
    use crate::graph::DiagramKind;
    use crate::layout::PlacedEdge;
    use crate::library::{FragmentPiece, InMemoryLibrary, LibraryFragment};

    fn positioned(key: &str, x: f64, component: Option<ComponentType>) -> PositionedNode {
        PositionedNode {
            key: key.to_string(),
            label: key.to_string(),
            x,
            y: 100.0,
            width: 160.0,
            height: 80.0,
            shape: ShapeKind::Rectangle,
            stroke: "#1971c2".to_string(),
            fill: "#e7f5ff".to_string(),
            stroke_width: 2,
            stroke_style: "solid".to_string(),
            font_size: 16.0,
            component,
        }
    }

    fn two_node_layout() -> Layout {
        Layout {
            kind: DiagramKind::Flowchart,
            nodes: vec![positioned("a", 100.0, None), positioned("b", 300.0, None)],
            edges: vec![PlacedEdge {
                source: "a".to_string(),
                target: "b".to_string(),
                start: (260.0, 140.0),
                end: (300.0, 140.0),
                gap: 5.0,
            }],
        }
    }

    #[test]
    fn shape_and_label_share_a_group() {
        let elements = render_elements(&two_node_layout(), &Config::default(), None);
        let shape = &elements[0];
        let (label_common, _) = elements[1].as_text().unwrap();
        assert_eq!(shape.common().group_ids, label_common.group_ids);
        assert_eq!(shape.common().group_ids, vec![shape.id().to_string()]);
    }

    #[test]
    fn arrow_bindings_reference_emitted_shapes() {
        let elements = render_elements(&two_node_layout(), &Config::default(), None);
        let shape_ids: HashSet<&str> = elements
            .iter()
            .filter(|element| element.is_shape())
            .map(|element| element.id())
            .collect();
        let arrows: Vec<_> = elements.iter().filter_map(|e| e.as_arrow()).collect();
        assert_eq!(arrows.len(), 1);
        let (_, props) = arrows[0];
        let start = props.start_binding.as_ref().unwrap();
        let end = props.end_binding.as_ref().unwrap();
        assert!(shape_ids.contains(start.element_id.as_str()));
        assert!(shape_ids.contains(end.element_id.as_str()));
        assert_ne!(start.element_id, end.element_id);
    }

    #[test]
    fn duplicate_edges_render_once() {
        let mut layout = two_node_layout();
        let duplicated = layout.edges[0].clone();
        layout.edges.push(duplicated);
        let elements = render_elements(&layout, &Config::default(), None);
        assert_eq!(elements.iter().filter(|e| e.as_arrow().is_some()).count(), 1);
    }

    #[test]
    fn arrow_points_span_start_to_end() {
        let elements = render_elements(&two_node_layout(), &Config::default(), None);
        let (common, props) = elements.iter().find_map(|e| e.as_arrow()).unwrap();
        assert_eq!((common.x, common.y), (260.0, 140.0));
        assert_eq!(props.points, vec![[0.0, 0.0], [40.0, 0.0]]);
        assert_eq!(props.last_committed_point, [40.0, 0.0]);
        assert_eq!(props.start_arrowhead, None);
        assert_eq!(props.end_arrowhead.as_deref(), Some("arrow"));
    }

    #[test]
    fn label_is_centered_by_estimated_width() {
        let layout = Layout {
            kind: DiagramKind::Flowchart,
            nodes: vec![positioned("abcd", 100.0, None)],
            edges: Vec::new(),
        };
        let elements = render_elements(&layout, &Config::default(), None);
        let (common, _) = elements[1].as_text().unwrap();
        // 4 chars at font 16 -> 32 estimated; (160 - 32) / 2 = 64 offset.
        assert_eq!(common.x, 164.0);
        assert_eq!(common.y, 130.0);
    }

    #[test]
    fn pro_style_substitutes_library_fragments() {
        let mut library = InMemoryLibrary::default();
        library.insert(
            ComponentType::Database,
            LibraryFragment {
                name: "db".to_string(),
                keywords: Vec::new(),
                pieces: vec![FragmentPiece {
                    kind: ShapeKind::Ellipse,
                    x: 0.0,
                    y: 0.0,
                    width: 80.0,
                    height: 80.0,
                    stroke: "#7c3aed".to_string(),
                    fill: "#ede9fe".to_string(),
                }],
            },
        );
        let layout = Layout {
            kind: DiagramKind::Architecture,
            nodes: vec![positioned("db", 100.0, Some(ComponentType::Database))],
            edges: Vec::new(),
        };

        let elements = render_elements(&layout, &Config::default(), Some(&library));
        assert_eq!(elements[0].type_name(), "ellipse");
        assert_eq!(elements[0].common().stroke_color, "#7c3aed");
        // Scaled into the 160x80 node box: uniform scale of 1.0 on height.
        assert_eq!(elements[0].common().height, 80.0);

        let mut basic = Config::default();
        basic.style = StyleMode::Basic;
        let plain = render_elements(&layout, &basic, Some(&library));
        assert_eq!(plain[0].type_name(), "rectangle");
    }
}
