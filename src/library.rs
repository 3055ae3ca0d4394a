//! Boundary to reusable component libraries.
//!
//! The engine never reads a library file; it only asks an implementor for
//! the best fragment for a component type and stamps that fragment into the
//! diagram at a position. Storage format and matching heuristics stay on the
//! other side of the trait.

use crate::classify::ComponentType;
use crate::element::{Element, ElementCommon, ShapeKind, new_id};
use crate::theme::Theme;

pub trait ComponentLibrary {
    /// Best fragment for the given component type, if the library has one.
    fn find_for_type(&self, component: ComponentType) -> Option<&LibraryFragment>;
}

/// One primitive inside a fragment, in the fragment's own coordinates.
#[derive(Debug, Clone)]
pub struct FragmentPiece {
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: String,
    pub fill: String,
}

/// Reusable named geometry with searchable keywords.
#[derive(Debug, Clone)]
pub struct LibraryFragment {
    pub name: String,
    pub keywords: Vec<String>,
    pub pieces: Vec<FragmentPiece>,
}

/// A fragment stamped into a diagram: fresh element ids under one fresh
/// group id, with the first element acting as the arrow-binding anchor.
#[derive(Debug, Clone)]
pub struct InstantiatedFragment {
    pub elements: Vec<Element>,
    pub group_id: String,
    pub anchor_id: String,
}

impl LibraryFragment {
    /// Bounding box `(min_x, min_y, width, height)` over all pieces.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        if self.pieces.is_empty() {
            return (0.0, 0.0, 100.0, 100.0);
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for piece in &self.pieces {
            min_x = min_x.min(piece.x);
            min_y = min_y.min(piece.y);
            max_x = max_x.max(piece.x + piece.width);
            max_y = max_y.max(piece.y + piece.height);
        }
        (min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Instantiate at `(x, y)`, scaled uniformly. Pieces are normalized
    /// against the fragment's bounding box so the top-left lands on `(x, y)`.
    pub fn instantiate(&self, x: f64, y: f64, scale: f64, theme: &Theme) -> InstantiatedFragment {
        let (min_x, min_y, _, _) = self.bounds();
        let group_id = new_id();
        let mut elements = Vec::with_capacity(self.pieces.len());

        for piece in &self.pieces {
            let mut common = ElementCommon::new(
                (piece.x - min_x) * scale + x,
                (piece.y - min_y) * scale + y,
                piece.width * scale,
                piece.height * scale,
            );
            common.stroke_color = piece.stroke.clone();
            common.background_color = piece.fill.clone();
            common.fill_style = theme.fill_style.clone();
            common.roughness = theme.roughness;
            common.group_ids = vec![group_id.clone()];
            elements.push(Element::shape(piece.kind, common));
        }

        let anchor_id = elements
            .first()
            .map(|element| element.id().to_string())
            .unwrap_or_default();
        InstantiatedFragment {
            elements,
            group_id,
            anchor_id,
        }
    }
}

/// Trivial in-process library, mostly useful for tests and embedders that
/// build their fragments programmatically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLibrary {
    fragments: Vec<(ComponentType, LibraryFragment)>,
}

impl InMemoryLibrary {
    pub fn insert(&mut self, component: ComponentType, fragment: LibraryFragment) {
        self.fragments.push((component, fragment));
    }
}

impl ComponentLibrary for InMemoryLibrary {
    fn find_for_type(&self, component: ComponentType) -> Option<&LibraryFragment> {
        self.fragments
            .iter()
            .find(|(candidate, _)| *candidate == component)
            .map(|(_, fragment)| fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment() -> LibraryFragment {
        LibraryFragment {
            name: "database".to_string(),
            keywords: vec!["db".to_string()],
            pieces: vec![
                FragmentPiece {
                    kind: ShapeKind::Ellipse,
                    x: 10.0,
                    y: 20.0,
                    width: 40.0,
                    height: 30.0,
                    stroke: "#7c3aed".to_string(),
                    fill: "#ede9fe".to_string(),
                },
                FragmentPiece {
                    kind: ShapeKind::Rectangle,
                    x: 10.0,
                    y: 50.0,
                    width: 40.0,
                    height: 10.0,
                    stroke: "#7c3aed".to_string(),
                    fill: "#ede9fe".to_string(),
                },
            ],
        }
    }

    #[test]
    fn bounds_cover_all_pieces() {
        assert_eq!(fragment().bounds(), (10.0, 20.0, 40.0, 40.0));
    }

    #[test]
    fn empty_fragment_has_placeholder_bounds() {
        let empty = LibraryFragment {
            name: "blank".to_string(),
            keywords: Vec::new(),
            pieces: Vec::new(),
        };
        assert_eq!(empty.bounds(), (0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn instantiate_translates_scales_and_groups() {
        let inst = fragment().instantiate(100.0, 200.0, 2.0, &Theme::modern());
        assert_eq!(inst.elements.len(), 2);
        let first = inst.elements[0].common();
        assert_eq!((first.x, first.y), (100.0, 200.0));
        assert_eq!((first.width, first.height), (80.0, 60.0));
        assert!(inst
            .elements
            .iter()
            .all(|element| element.common().group_ids == vec![inst.group_id.clone()]));
        assert_eq!(inst.anchor_id, inst.elements[0].id());
    }

    #[test]
    fn in_memory_library_lookup() {
        let mut library = InMemoryLibrary::default();
        library.insert(ComponentType::Database, fragment());
        assert!(library.find_for_type(ComponentType::Database).is_some());
        assert!(library.find_for_type(ComponentType::Cache).is_none());
    }
}
