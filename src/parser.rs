//! Splitting of text descriptions into template inputs.
//!
//! Separator patterns are checked in a fixed priority order; the first one
//! that matches decides how the description is split. An input without any
//! separator is a single step, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

static FLOW_SEPARATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\s*->\s*", r"\s*→\s*", r"\s+then\s+", r"\s+next\s+"]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

static STEP_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*->\s*|\s*→\s*|\s+then\s+|\s+next\s+").unwrap());

static GROUP_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,，、;]").unwrap());

static CHILD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,，、;\n]").unwrap());

/// Flowchart steps, in order. The first separator pattern that matches
/// splits the whole description; empty segments are kept so that a trailing
/// arrow still produces a (blank) step.
pub fn parse_flow_steps(description: &str) -> Vec<String> {
    let trimmed = description.trim();
    for separator in FLOW_SEPARATORS.iter() {
        if separator.is_match(trimmed) {
            return separator
                .split(trimmed)
                .map(|step| step.trim().to_string())
                .collect();
        }
    }
    vec![trimmed.to_string()]
}

/// Parsed architecture description: the unique component names in order of
/// first appearance, plus each flow as a list of parallel groups.
#[derive(Debug, Clone, Default)]
pub struct ArchitectureDescription {
    pub components: Vec<String>,
    pub flows: Vec<Vec<Vec<String>>>,
}

/// Architecture text input: `|` separates independent flows, arrows separate
/// steps within a flow, commas group parallel components within a step.
pub fn parse_architecture(description: &str) -> ArchitectureDescription {
    let mut parsed = ArchitectureDescription::default();

    for flow_text in description.split('|') {
        let flow_text = flow_text.trim();
        if flow_text.is_empty() {
            continue;
        }
        let steps: Vec<Vec<String>> = STEP_SEPARATOR
            .split(flow_text)
            .map(|step| {
                GROUP_SEPARATOR
                    .split(step)
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|group: &Vec<String>| !group.is_empty())
            .collect();

        for group in &steps {
            for name in group {
                if !parsed.components.iter().any(|existing| existing == name) {
                    parsed.components.push(name.clone());
                }
            }
        }
        if steps.len() > 1 {
            parsed.flows.push(steps);
        }
    }

    if parsed.components.is_empty() {
        parsed.components.push(description.trim().to_string());
    }
    parsed
}

#[derive(Debug, Clone)]
pub struct MindmapDescription {
    pub root: String,
    pub children: Vec<String>,
}

/// Mindmap input: `root: child, child, ...`. Without a colon the whole
/// description is the root and the diagram has no branches.
pub fn parse_mindmap(description: &str) -> MindmapDescription {
    let (root, rest) = match description.split_once([':', '：']) {
        Some((root, rest)) => (root.trim(), rest.trim()),
        None => (description.trim(), ""),
    };

    let children = if rest.is_empty() {
        Vec::new()
    } else {
        CHILD_SEPARATOR
            .split(rest)
            .map(str::trim)
            .filter(|child| !child.is_empty())
            .map(str::to_string)
            .collect()
    };

    MindmapDescription {
        root: root.to_string(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_ascii_arrow() {
        let steps = parse_flow_steps("A -> B -> C");
        assert_eq!(steps, ["A", "B", "C"]);
    }

    #[test]
    fn splits_on_word_separators() {
        assert_eq!(parse_flow_steps("login then verify"), ["login", "verify"]);
        assert_eq!(parse_flow_steps("fetch next decode"), ["fetch", "decode"]);
        // "then" inside a word is not a separator
        assert_eq!(parse_flow_steps("authenticate user").len(), 1);
    }

    #[test]
    fn no_separator_is_a_single_step() {
        assert_eq!(parse_flow_steps("deploy"), ["deploy"]);
        assert_eq!(parse_flow_steps(""), [""]);
    }

    #[test]
    fn architecture_groups_and_flows() {
        let parsed = parse_architecture("Web, Mobile -> API -> Database");
        assert_eq!(parsed.components, ["Web", "Mobile", "API", "Database"]);
        assert_eq!(parsed.flows.len(), 1);
        assert_eq!(parsed.flows[0][0], ["Web", "Mobile"]);
        assert_eq!(parsed.flows[0][2], ["Database"]);
    }

    #[test]
    fn architecture_pipe_separates_flows() {
        let parsed = parse_architecture("A -> B | C -> B");
        assert_eq!(parsed.components, ["A", "B", "C"]);
        assert_eq!(parsed.flows.len(), 2);
    }

    #[test]
    fn architecture_repeated_component_kept_once() {
        let parsed = parse_architecture("API -> Cache -> API");
        assert_eq!(parsed.components, ["API", "Cache"]);
    }

    #[test]
    fn mindmap_root_and_children() {
        let parsed = parse_mindmap("Project: plan, build; ship");
        assert_eq!(parsed.root, "Project");
        assert_eq!(parsed.children, ["plan", "build", "ship"]);
    }

    #[test]
    fn mindmap_fullwidth_colon() {
        let parsed = parse_mindmap("计划：设计、实现");
        assert_eq!(parsed.root, "计划");
        assert_eq!(parsed.children, ["设计", "实现"]);
    }

    #[test]
    fn mindmap_without_children() {
        let parsed = parse_mindmap("Overview");
        assert_eq!(parsed.root, "Overview");
        assert!(parsed.children.is_empty());
    }
}
