//! TikZ Grapher - draw graphs given as adjacency matrices with TikZ
//!
//! This library provides a matrix parser, a deterministic spring layout and a
//! TikZ renderer. The output can be pasted into a LaTeX document as is, or
//! produced as a complete standalone document.
//!
//! # Example
//!
//! ```rust
//! use tikz_grapher::render;
//!
//! let tikz = render("0,1\n1,0").unwrap();
//! assert!(tikz.contains("\\begin{tikzpicture}"));
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod parser;
pub mod phylo;
pub mod renderer;
pub mod style;

pub use config::ConfigError;
pub use error::{FormatError, MatrixError, ShapeError};
pub use layout::{Layout, LayoutConfig, LayoutError, LoopPlacement};
pub use matrix::AdjacencyMatrix;
pub use parser::{parse, MatrixFormat};
pub use phylo::{parse_splits, PhylogeneticTree, TreeError};
pub use renderer::{Drawing, LabelMode, TikzGrapher};
pub use style::{EdgePrimitiveRenderer, LineStyle, NodePrimitiveRenderer, NodeStyle};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// The matrix text could not be read
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),

    /// An option could not be applied
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The tree could not be built
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfig {
    /// Encoding of the matrix text
    pub format: MatrixFormat,
    /// Layout configuration
    pub layout: LayoutConfig,
    pub node_style: NodeStyle,
    pub line_style: LineStyle,
    /// Text inside each node
    pub labels: LabelMode,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the matrix text encoding
    pub fn with_format(mut self, format: MatrixFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the node style
    pub fn with_node_style(mut self, style: NodeStyle) -> Self {
        self.node_style = style;
        self
    }

    /// Set the line style
    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    /// Set the node labels
    pub fn with_labels(mut self, labels: LabelMode) -> Self {
        self.labels = labels;
        self
    }

    fn grapher(&self) -> TikzGrapher {
        TikzGrapher::new(self.node_style.clone(), self.line_style.clone())
    }
}

/// Render CSV matrix text to TikZ with default configuration
///
/// This is the main entry point for the library. It parses the matrix,
/// computes the layout and returns the preamble lines followed by the
/// `tikzpicture`.
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, &RenderConfig::default())
}

/// Render matrix text to TikZ with custom configuration
///
/// # Example
///
/// ```rust
/// use tikz_grapher::{render_with_config, LabelMode, LineStyle, MatrixFormat, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_format(MatrixFormat::Python)
///     .with_line_style(LineStyle::default().with_directed(false))
///     .with_labels(LabelMode::Numbered);
///
/// let tikz = render_with_config("[[0,1,1],[1,0,1],[1,1,0]]", &config).unwrap();
/// assert_eq!(tikz.matches("\\draw").count(), 3);
/// assert!(tikz.contains("{ 2 }"));
/// ```
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    Ok(draw(source, config)?.body())
}

/// Render matrix text to a complete standalone LaTeX document
pub fn render_document(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    Ok(draw(source, config)?.document())
}

/// Parse, lay out and render matrix text, keeping preamble and picture apart
pub fn draw(source: &str, config: &RenderConfig) -> Result<Drawing, RenderError> {
    let matrix = parse(source, config.format)?;
    draw_matrix(&matrix, config)
}

/// Lay out and render an already validated matrix
pub fn draw_matrix(matrix: &AdjacencyMatrix, config: &RenderConfig) -> Result<Drawing, RenderError> {
    debug!(
        nodes = matrix.size(),
        directed = config.line_style.directed,
        "rendering matrix"
    );
    Ok(config.grapher().draw(matrix, &config.layout, config.labels)?)
}

/// Render a phylogenetic tree given by its splits
pub fn draw_tree(tree: &PhylogeneticTree, config: &RenderConfig) -> Result<Drawing, RenderError> {
    let matrix = tree.adjacency_matrix()?;
    draw_matrix(&matrix, config)
}
