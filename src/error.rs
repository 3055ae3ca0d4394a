use thiserror::Error;

use crate::graph::DiagramKind;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Graph input only makes sense for the layered architecture template.
    #[error("graph input is only supported by the architecture template, not {0}")]
    GraphInputUnsupported(DiagramKind),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("unknown style: {0}")]
    UnknownStyle(String),

    #[error("duplicate node key: {0}")]
    DuplicateNode(String),

    /// Only raised in strict mode; the default is to drop the edge.
    #[error("edge references unknown node key: {0}")]
    DanglingEdge(String),
}
