//! Excalidraw element model and the document envelope.
//!
//! Field names, nesting, and the five element type tags are the import
//! contract of the consuming whiteboard tool and are not negotiable; the
//! serde attributes below pin them down.

use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Diamond,
}

/// Fields shared by every element kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementCommon {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: String,
    pub stroke_width: u32,
    pub stroke_style: String,
    pub roughness: u8,
    pub opacity: u8,
    pub group_ids: Vec<String>,
    pub seed: u32,
    pub version_nonce: u32,
    pub is_deleted: bool,
}

impl ElementCommon {
    /// Fresh element scaffold with the fixed defaults of the output format.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let id = new_id();
        let seed = id_digest(&id);
        let version_nonce = id_digest(&format!("{id}nonce"));
        Self {
            id,
            x,
            y,
            width,
            height,
            angle: 0.0,
            stroke_color: "#1971c2".to_string(),
            background_color: "#a5d8ff".to_string(),
            fill_style: "solid".to_string(),
            stroke_width: 2,
            stroke_style: "solid".to_string(),
            roughness: 1,
            opacity: 100,
            group_ids: Vec::new(),
            seed,
            version_nonce,
            is_deleted: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    pub font_family: u8,
    pub text_align: String,
    pub vertical_align: String,
    pub container_id: Option<String>,
    pub original_text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub element_id: String,
    pub focus: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowProps {
    pub points: Vec<[f64; 2]>,
    pub last_committed_point: [f64; 2],
    pub start_binding: Option<Binding>,
    pub end_binding: Option<Binding>,
    pub start_arrowhead: Option<String>,
    pub end_arrowhead: Option<String>,
}

/// Closed set of element kinds; the serializer matches exhaustively and the
/// tag becomes the `type` field of the output record.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rectangle {
        #[serde(flatten)]
        common: ElementCommon,
    },
    Ellipse {
        #[serde(flatten)]
        common: ElementCommon,
    },
    Diamond {
        #[serde(flatten)]
        common: ElementCommon,
    },
    Text {
        #[serde(flatten)]
        common: ElementCommon,
        #[serde(flatten)]
        text: TextProps,
    },
    Arrow {
        #[serde(flatten)]
        common: ElementCommon,
        #[serde(flatten)]
        arrow: ArrowProps,
    },
}

impl Element {
    pub fn shape(kind: ShapeKind, common: ElementCommon) -> Self {
        match kind {
            ShapeKind::Rectangle => Self::Rectangle { common },
            ShapeKind::Ellipse => Self::Ellipse { common },
            ShapeKind::Diamond => Self::Diamond { common },
        }
    }

    pub fn common(&self) -> &ElementCommon {
        match self {
            Self::Rectangle { common }
            | Self::Ellipse { common }
            | Self::Diamond { common }
            | Self::Text { common, .. }
            | Self::Arrow { common, .. } => common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Ellipse { .. } => "ellipse",
            Self::Diamond { .. } => "diamond",
            Self::Text { .. } => "text",
            Self::Arrow { .. } => "arrow",
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Self::Rectangle { .. } | Self::Ellipse { .. } | Self::Diamond { .. }
        )
    }

    pub fn as_arrow(&self) -> Option<(&ElementCommon, &ArrowProps)> {
        match self {
            Self::Arrow { common, arrow } => Some((common, arrow)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<(&ElementCommon, &TextProps)> {
        match self {
            Self::Text { common, text } => Some((common, text)),
            _ => None,
        }
    }
}

/// Opaque identifier, fresh per invocation.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Small numeric digest used for the seed and versionNonce fields. The
/// consuming tool only needs a stable value per element, not a real nonce.
fn id_digest(input: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    (hasher.finish() % 1000) as u32
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Zoom {
    pub value: f64,
}

/// Fixed viewport/background/tool state of the envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub grid_size: Option<u32>,
    pub view_background_color: String,
    pub current_item_stroke_color: String,
    pub current_item_background_color: String,
    pub current_item_fill_style: String,
    pub current_item_stroke_width: u32,
    pub current_item_stroke_style: String,
    pub current_item_roughness: u8,
    pub current_item_opacity: u8,
    pub current_item_font_family: u8,
    pub current_item_font_size: u32,
    pub current_item_text_align: String,
    pub current_item_start_arrowhead: Option<String>,
    pub current_item_end_arrowhead: Option<String>,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: Zoom,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            grid_size: None,
            view_background_color: "#ffffff".to_string(),
            current_item_stroke_color: "#1971c2".to_string(),
            current_item_background_color: "#a5d8ff".to_string(),
            current_item_fill_style: "solid".to_string(),
            current_item_stroke_width: 2,
            current_item_stroke_style: "solid".to_string(),
            current_item_roughness: 1,
            current_item_opacity: 100,
            current_item_font_family: 1,
            current_item_font_size: 20,
            current_item_text_align: "left".to_string(),
            current_item_start_arrowhead: None,
            current_item_end_arrowhead: Some("arrow".to_string()),
            scroll_x: 0.0,
            scroll_y: 0.0,
            zoom: Zoom { value: 1.0 },
        }
    }
}

/// Top-level output artifact: envelope plus the ordered element list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub version: u32,
    pub source: String,
    pub elements: Vec<Element>,
    pub app_state: AppState,
    pub files: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            doc_type: "excalidraw".to_string(),
            version: 2,
            source: "https://excalidraw.com".to_string(),
            elements,
            app_state: AppState::default(),
            files: BTreeMap::new(),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
