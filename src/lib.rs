//! Diagram synthesis into the Excalidraw document format.
//!
//! Pipeline: a text description or analyzer graph becomes a [`graph::Graph`],
//! nodes are classified into component types, the template's layout assigns
//! coordinates, and the renderer packs shapes, labels, and bound arrows into
//! a serializable [`Document`].

pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod element;
pub mod error;
pub mod graph;
pub mod layout;
pub mod library;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, StyleMode};
pub use element::Document;
pub use error::GenerateError;
pub use graph::{DiagramKind, Graph, GraphFile};
pub use library::ComponentLibrary;
pub use theme::Theme;

/// Generate a diagram document from a text description.
pub fn generate(
    description: &str,
    kind: DiagramKind,
    config: &Config,
    library: Option<&dyn ComponentLibrary>,
) -> Result<Document, GenerateError> {
    let layout = layout::layout_description(kind, description, config)?;
    Ok(Document::new(render::render_elements(&layout, config, library)))
}

/// Generate a diagram document from a pre-built architecture graph.
pub fn generate_from_graph(
    graph: &Graph,
    kind: DiagramKind,
    config: &Config,
    library: Option<&dyn ComponentLibrary>,
) -> Result<Document, GenerateError> {
    let layout = layout::layout_graph(kind, graph, config)?;
    Ok(Document::new(render::render_elements(&layout, config, library)))
}
