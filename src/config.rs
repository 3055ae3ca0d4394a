use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::theme::Theme;

/// Palette selection: the pro palette colors architecture components by
/// their classified type; basic sticks to the flat theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    #[default]
    Pro,
    Basic,
}

impl StyleMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pro" => Some(Self::Pro),
            "basic" => Some(Self::Basic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub style: StyleMode,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fail on edges referencing unknown nodes instead of dropping them.
    pub strict_edges: bool,
    pub flowchart: FlowchartConfig,
    pub architecture: ArchitectureConfig,
    pub mindmap: MindmapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowchartConfig {
    pub x_start: f64,
    pub y_start: f64,
    pub step_width: f64,
    pub step_height: f64,
    pub step_spacing: f64,
    pub terminal_width: f64,
    pub decision_width: f64,
    pub decision_height: f64,
    pub font_size: f64,
    pub arrow_gap: f64,
}

impl Default for FlowchartConfig {
    fn default() -> Self {
        Self {
            x_start: 100.0,
            y_start: 100.0,
            step_width: 140.0,
            step_height: 60.0,
            step_spacing: 200.0,
            terminal_width: 120.0,
            decision_width: 100.0,
            decision_height: 80.0,
            font_size: 16.0,
            arrow_gap: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureConfig {
    pub x_start: f64,
    pub y_start: f64,
    pub node_width: f64,
    pub node_height: f64,
    pub layer_spacing: f64,
    pub node_spacing: f64,
    /// Minimum horizontal distance between siblings in one layer.
    pub min_spacing: f64,
    pub font_size: f64,
    pub arrow_gap: f64,
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self {
            x_start: 100.0,
            y_start: 100.0,
            node_width: 160.0,
            node_height: 80.0,
            layer_spacing: 200.0,
            node_spacing: 250.0,
            min_spacing: 180.0,
            font_size: 16.0,
            arrow_gap: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MindmapConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub root_min_width: f64,
    pub root_height: f64,
    pub root_char_width: f64,
    pub root_font_size: f64,
    pub child_min_width: f64,
    pub child_height: f64,
    pub child_char_width: f64,
    pub child_font_size: f64,
    pub arrow_gap: f64,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            center_x: 400.0,
            center_y: 300.0,
            radius: 250.0,
            root_min_width: 120.0,
            root_height: 60.0,
            root_char_width: 15.0,
            root_font_size: 20.0,
            child_min_width: 100.0,
            child_height: 50.0,
            child_char_width: 12.0,
            child_font_size: 16.0,
            arrow_gap: 5.0,
        }
    }
}

/// Optional config file, JSON5 so hand-written files may carry comments and
/// trailing commas. Absent sections keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    theme: Option<String>,
    style: Option<String>,
    layout: Option<LayoutConfig>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(name)
            .ok_or_else(|| GenerateError::UnknownTheme(name.to_string()))?;
    }
    if let Some(name) = parsed.style.as_deref() {
        config.style = StyleMode::from_name(name)
            .ok_or_else(|| GenerateError::UnknownStyle(name.to_string()))?;
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.style, StyleMode::Pro);
        assert!(!config.layout.strict_edges);
        assert_eq!(config.layout.architecture.node_spacing, 250.0);
    }

    #[test]
    fn partial_layout_section_keeps_other_defaults() {
        let parsed: LayoutConfig =
            json5::from_str(r#"{ strict_edges: true, mindmap: { radius: 300 } }"#).unwrap();
        assert!(parsed.strict_edges);
        assert_eq!(parsed.mindmap.radius, 300.0);
        assert_eq!(parsed.mindmap.center_x, 400.0);
        assert_eq!(parsed.flowchart.step_spacing, 200.0);
    }

    #[test]
    fn style_names() {
        assert_eq!(StyleMode::from_name("PRO"), Some(StyleMode::Pro));
        assert_eq!(StyleMode::from_name("basic"), Some(StyleMode::Basic));
        assert_eq!(StyleMode::from_name("fancy"), None);
    }
}
