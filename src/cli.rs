use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::{Config, StyleMode, load_config};
use crate::element::Document;
use crate::graph::{DiagramKind, GraphFile};
use crate::theme::Theme;

#[derive(Parser, Debug)]
#[command(
    name = "exgen",
    version,
    about = "Generate Excalidraw diagrams from text descriptions and architecture graphs"
)]
pub struct Args {
    /// Diagram description, e.g. "User login -> Verify -> Access data"
    pub description: Option<String>,

    /// Diagram template
    #[arg(short = 't', long = "type", value_enum, default_value_t = DiagramType::Flowchart)]
    pub diagram_type: DiagramType,

    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeName>,

    /// pro = per-component palette, basic = flat theme colors
    #[arg(long, value_enum)]
    pub style: Option<StyleName>,

    /// Architecture graph JSON from an external analyzer (architecture template only)
    #[arg(short = 'g', long = "graph")]
    pub graph: Option<PathBuf>,

    /// Config JSON5 file merged over the built-in defaults
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to diagram_<type>.json
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Fail on edges that reference unknown nodes (dropped silently by default)
    #[arg(long)]
    pub strict: bool,

    /// Print an element summary to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DiagramType {
    Flowchart,
    Architecture,
    Mindmap,
}

impl From<DiagramType> for DiagramKind {
    fn from(value: DiagramType) -> Self {
        match value {
            DiagramType::Flowchart => Self::Flowchart,
            DiagramType::Architecture => Self::Architecture,
            DiagramType::Mindmap => Self::Mindmap,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ThemeName {
    Modern,
    Sketchy,
    Technical,
    Colorful,
}

impl From<ThemeName> for Theme {
    fn from(value: ThemeName) -> Self {
        match value {
            ThemeName::Modern => Theme::modern(),
            ThemeName::Sketchy => Theme::sketchy(),
            ThemeName::Technical => Theme::technical(),
            ThemeName::Colorful => Theme::colorful(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StyleName {
    Pro,
    Basic,
}

impl From<StyleName> for StyleMode {
    fn from(value: StyleName) -> Self {
        match value {
            StyleName::Pro => Self::Pro,
            StyleName::Basic => Self::Basic,
        }
    }
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(theme) = args.theme {
        config.theme = theme.into();
    }
    if let Some(style) = args.style {
        config.style = style.into();
    }
    if args.strict {
        config.layout.strict_edges = true;
    }

    let kind: DiagramKind = args.diagram_type.into();
    let document = if let Some(path) = args.graph.as_deref() {
        generate_from_graph_file(path, kind, &config)?
    } else {
        let description = args.description.as_deref().ok_or_else(|| {
            anyhow::anyhow!("a description or --graph input is required")
        })?;
        crate::generate(description, kind, &config, None)?
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("diagram_{kind}.json")));
    std::fs::write(&output, document.to_json()?)?;

    if args.verbose {
        eprintln!("{}", summarize(&document));
    }
    log::info!("diagram written to {}", output.display());
    println!(
        "Diagram written: {} ({} elements)",
        output.display(),
        document.elements().len()
    );
    Ok(())
}

fn generate_from_graph_file(path: &Path, kind: DiagramKind, config: &Config) -> Result<Document> {
    let contents = std::fs::read_to_string(path)?;
    let file: GraphFile = serde_json::from_str(&contents)?;
    let graph = file.into_graph()?;
    Ok(crate::generate_from_graph(&graph, kind, config, None)?)
}

fn summarize(document: &Document) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for element in document.elements() {
        *counts.entry(element.type_name()).or_default() += 1;
    }
    let mut out = format!("{} elements:", document.elements().len());
    for (name, count) in counts {
        out.push_str(&format!("\n  {name}: {count}"));
    }
    out
}
