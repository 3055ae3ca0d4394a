use crate::config::Config;
use crate::element::ShapeKind;
use crate::error::GenerateError;
use crate::graph::DiagramKind;
use crate::parser::parse_flow_steps;

use super::{Layout, PlacedEdge, PositionedNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Terminal,
    Decision,
    Process,
}

const TERMINAL_KEYWORDS: &[&str] = &["start", "begin", "end", "finish", "complete"];
const DECISION_KEYWORDS: &[&str] = &["if", "decision", "judge", "whether"];

fn step_kind(step: &str) -> StepKind {
    let lowered = step.to_ascii_lowercase();
    if TERMINAL_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        StepKind::Terminal
    } else if DECISION_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        StepKind::Decision
    } else {
        StepKind::Process
    }
}

/// Linear left-to-right chain: one shape per step, a straight arrow between
/// each consecutive pair, anchored right edge to left edge.
pub(super) fn compute_flowchart_layout(
    description: &str,
    config: &Config,
) -> Result<Layout, GenerateError> {
    let flow = &config.layout.flowchart;
    let theme = &config.theme;
    let steps = parse_flow_steps(description);

    let mut nodes = Vec::with_capacity(steps.len());
    let mut edges = Vec::new();

    for (idx, step) in steps.iter().enumerate() {
        let (shape, width, height) = match step_kind(step) {
            StepKind::Terminal => (ShapeKind::Ellipse, flow.terminal_width, flow.step_height),
            StepKind::Decision => (ShapeKind::Diamond, flow.decision_width, flow.decision_height),
            StepKind::Process => (ShapeKind::Rectangle, flow.step_width, flow.step_height),
        };
        let x = flow.x_start + idx as f64 * flow.step_spacing;
        let y = flow.y_start;

        nodes.push(PositionedNode {
            key: format!("step{idx}"),
            label: step.clone(),
            x,
            y,
            width,
            height,
            shape,
            stroke: theme.stroke.clone(),
            fill: theme.background.clone(),
            stroke_width: 2,
            stroke_style: "solid".to_string(),
            font_size: flow.font_size,
            component: None,
        });

        if idx > 0 {
            let prev = &nodes[idx - 1];
            let curr = &nodes[idx];
            let start = (prev.x + prev.width, prev.y + prev.height / 2.0);
            edges.push(PlacedEdge {
                source: prev.key.clone(),
                target: curr.key.clone(),
                start,
                end: (curr.x, start.1),
                gap: flow.arrow_gap,
            });
        }
    }

    Ok(Layout {
        kind: DiagramKind::Flowchart,
        nodes,
        edges,
    })
}
