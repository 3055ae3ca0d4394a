use crate::config::Config;
use crate::element::ShapeKind;
use crate::error::GenerateError;
use crate::graph::DiagramKind;
use crate::parser::parse_mindmap;

use super::{Layout, PlacedEdge, PositionedNode};

/// Radial layout: the root sits at a fixed center, children sit on a circle
/// around it at equal angular increments starting at angle 0. No children
/// means a root-only diagram, which is defined behavior rather than an error.
pub(super) fn compute_mindmap_layout(
    description: &str,
    config: &Config,
) -> Result<Layout, GenerateError> {
    let mm = &config.layout.mindmap;
    let theme = &config.theme;
    let parsed = parse_mindmap(description);

    let root_width =
        (parsed.root.chars().count() as f64 * mm.root_char_width).max(mm.root_min_width);
    let mut nodes = vec![PositionedNode {
        key: "root".to_string(),
        label: parsed.root.clone(),
        x: mm.center_x - root_width / 2.0,
        y: mm.center_y - mm.root_height / 2.0,
        width: root_width,
        height: mm.root_height,
        shape: ShapeKind::Rectangle,
        stroke: theme.stroke.clone(),
        fill: theme.background.clone(),
        stroke_width: 2,
        stroke_style: "solid".to_string(),
        font_size: mm.root_font_size,
        component: None,
    }];
    let mut edges = Vec::new();

    if parsed.children.is_empty() {
        return Ok(Layout {
            kind: DiagramKind::Mindmap,
            nodes,
            edges,
        });
    }

    let angle_step = 360.0 / parsed.children.len() as f64;
    for (idx, child) in parsed.children.iter().enumerate() {
        let angle = (idx as f64 * angle_step).to_radians();
        let child_width =
            (child.chars().count() as f64 * mm.child_char_width).max(mm.child_min_width);
        let child_x = mm.center_x + mm.radius * angle.cos();
        let child_y = mm.center_y + mm.radius * angle.sin();
        let key = format!("branch{idx}");

        nodes.push(PositionedNode {
            key: key.clone(),
            label: child.clone(),
            x: child_x - child_width / 2.0,
            y: child_y - mm.child_height / 2.0,
            width: child_width,
            height: mm.child_height,
            shape: ShapeKind::Ellipse,
            stroke: theme.stroke.clone(),
            fill: "transparent".to_string(),
            stroke_width: 1,
            stroke_style: theme.accent_stroke_style.clone(),
            font_size: mm.child_font_size,
            component: None,
        });

        edges.push(PlacedEdge {
            source: "root".to_string(),
            target: key,
            start: (mm.center_x, mm.center_y),
            end: (child_x, child_y),
            gap: mm.arrow_gap,
        });
    }

    Ok(Layout {
        kind: DiagramKind::Mindmap,
        nodes,
        edges,
    })
}
