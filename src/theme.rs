use serde::{Deserialize, Serialize};

/// Flat visual defaults applied outside the pro component palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub stroke: String,
    pub background: String,
    pub line: String,
    pub fill_style: String,
    pub roughness: u8,
    pub font_family: u8,
    pub accent_stroke_style: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            stroke: "#1971c2".to_string(),
            background: "#e7f5ff".to_string(),
            line: "#1971c2".to_string(),
            fill_style: "solid".to_string(),
            roughness: 1,
            font_family: 1,
            accent_stroke_style: "solid".to_string(),
        }
    }

    pub fn sketchy() -> Self {
        Self {
            stroke: "#495057".to_string(),
            background: "#f8f9fa".to_string(),
            line: "#868e96".to_string(),
            fill_style: "hachure".to_string(),
            roughness: 2,
            font_family: 3,
            accent_stroke_style: "solid".to_string(),
        }
    }

    pub fn technical() -> Self {
        Self {
            stroke: "#2f9e44".to_string(),
            background: "#ebfbee".to_string(),
            line: "#2f9e44".to_string(),
            fill_style: "solid".to_string(),
            roughness: 1,
            font_family: 1,
            accent_stroke_style: "dashed".to_string(),
        }
    }

    pub fn colorful() -> Self {
        Self {
            stroke: "#e03131".to_string(),
            background: "#fff5f5".to_string(),
            line: "#e03131".to_string(),
            fill_style: "solid".to_string(),
            roughness: 1,
            font_family: 1,
            accent_stroke_style: "solid".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::modern()),
            "sketchy" => Some(Self::sketchy()),
            "technical" => Some(Self::technical()),
            "colorful" => Some(Self::colorful()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
