//! TikZ generation from a matrix and its layout

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::layout::loops::ISOLATED_LOOP_ANGLE;
use crate::layout::{self, Layout, LayoutConfig, LayoutError};
use crate::matrix::AdjacencyMatrix;
use crate::style::{
    merge_headers, Bend, EdgePrimitiveRenderer, LineStyle, NodePrimitiveRenderer, NodeStyle,
};

use super::document::standalone_document;

/// Text placed inside each node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Empty nodes
    #[default]
    None,
    /// Each node shows its index
    Numbered,
}

impl LabelMode {
    fn label(&self, index: usize) -> String {
        match self {
            LabelMode::None => String::new(),
            LabelMode::Numbered => index.to_string(),
        }
    }
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMode::None => f.write_str("none"),
            LabelMode::Numbered => f.write_str("numbered"),
        }
    }
}

impl FromStr for LabelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" | "None" => Ok(LabelMode::None),
            "numbered" => Ok(LabelMode::Numbered),
            other => Err(format!(
                "unknown label mode '{}' (expected none or numbered)",
                other
            )),
        }
    }
}

/// A rendered drawing, split into preamble lines and the picture itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    /// Lines that belong before `\begin{document}`
    pub header: String,
    /// The `tikzpicture` environment
    pub picture: String,
}

impl Drawing {
    /// Header followed by the picture, for pasting into an existing document
    pub fn body(&self) -> String {
        format!("{}{}", self.header, self.picture)
    }

    /// A complete standalone document
    pub fn document(&self) -> String {
        standalone_document(&self.header, &self.picture)
    }
}

/// Render `matrix` at the positions in `layout`.
///
/// Nodes come first, in index order. Edges follow: one-way edges in
/// row-major order, then each mutual pair once from the upper triangle.
/// A directed mutual pair becomes two arcs bending apart; an undirected one
/// a single straight line. Diagonal entries become self-loops.
pub fn render<N, E>(
    matrix: &AdjacencyMatrix,
    layout: &Layout,
    nodes: &N,
    lines: &E,
    labels: LabelMode,
) -> Drawing
where
    N: NodePrimitiveRenderer + ?Sized,
    E: EdgePrimitiveRenderer + ?Sized,
{
    let mut picture = String::from("\\begin{tikzpicture}\n");
    picture.push_str(&node_block(matrix, layout, nodes, labels));
    picture.push_str(&line_block(matrix, layout, lines));
    picture.push_str("\n\\end{tikzpicture}\n");

    let node_header = nodes.header();
    let line_header = lines.header();
    Drawing {
        header: merge_headers([node_header.as_str(), line_header.as_str()]),
        picture,
    }
}

fn node_block<N>(matrix: &AdjacencyMatrix, layout: &Layout, style: &N, labels: LabelMode) -> String
where
    N: NodePrimitiveRenderer + ?Sized,
{
    let body: String = layout
        .nodes
        .iter()
        .take(matrix.size())
        .enumerate()
        .map(|(i, &position)| style.render_node(i, position, &labels.label(i)))
        .collect();
    style.scope(&body)
}

fn line_block<E>(matrix: &AdjacencyMatrix, layout: &Layout, style: &E) -> String
where
    E: EdgePrimitiveRenderer + ?Sized,
{
    let mut body = String::new();

    for (from, to) in matrix.unidirectional_edges() {
        body.push_str(&style.render_line(from, to, None));
    }

    for (a, b) in matrix.mutual_pairs() {
        if a != b {
            if style.is_directed() {
                body.push_str(&style.render_line(a, b, Some(Bend::Left)));
                body.push_str(&style.render_line(b, a, Some(Bend::Left)));
            } else {
                body.push_str(&style.render_line(a, b, None));
            }
            continue;
        }

        let angle = layout.loop_angle(a).unwrap_or_else(|| {
            warn!(node = a, "no loop angle in layout, pointing loop up");
            ISOLATED_LOOP_ANGLE
        });
        body.push_str(&style.render_selfloop(a, angle, matrix.asymmetric_degree(a)));
    }

    style.scope(&body)
}

/// Pairs a node style with a line style and draws whole graphs with them
#[derive(Debug, Clone, Default)]
pub struct TikzGrapher<N = NodeStyle, E = LineStyle> {
    pub node_style: N,
    pub line_style: E,
}

impl<N, E> TikzGrapher<N, E>
where
    N: NodePrimitiveRenderer,
    E: EdgePrimitiveRenderer,
{
    pub fn new(node_style: N, line_style: E) -> Self {
        Self {
            node_style,
            line_style,
        }
    }

    /// Lay out `matrix` and render it
    pub fn draw(
        &self,
        matrix: &AdjacencyMatrix,
        config: &LayoutConfig,
        labels: LabelMode,
    ) -> Result<Drawing, LayoutError> {
        let layout = layout::compute(matrix, config)?;
        debug!(nodes = layout.node_count(), loops = layout.loops.len(), "rendering tikz");
        Ok(render(matrix, &layout, &self.node_style, &self.line_style, labels))
    }

    /// Header and `tikzpicture` for `matrix`
    pub fn to_tikz(
        &self,
        matrix: &AdjacencyMatrix,
        config: &LayoutConfig,
        labels: LabelMode,
    ) -> Result<String, LayoutError> {
        Ok(self.draw(matrix, config, labels)?.body())
    }

    /// Standalone document for `matrix`
    pub fn to_document(
        &self,
        matrix: &AdjacencyMatrix,
        config: &LayoutConfig,
        labels: LabelMode,
    ) -> Result<String, LayoutError> {
        Ok(self.draw(matrix, config, labels)?.document())
    }
}
