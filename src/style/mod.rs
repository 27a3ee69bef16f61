//! Style models that turn nodes and edges into TikZ primitives
//!
//! A render uses one node style and one line style for the whole drawing.
//! Each style emits single primitives, wraps the collected primitives in a
//! scope carrying the shared attributes, and reports any preamble lines it
//! needs outside the `tikzpicture` environment.

pub mod line;
pub mod node;

pub use line::LineStyle;
pub use node::NodeStyle;

use std::collections::HashSet;
use std::fmt;

use crate::layout::Point;

/// Which way a curved edge bows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bend {
    Left,
    Right,
}

impl fmt::Display for Bend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bend::Left => f.write_str("[bend left=30]"),
            Bend::Right => f.write_str("[bend right=30]"),
        }
    }
}

/// Renders nodes
pub trait NodePrimitiveRenderer {
    /// A single named node at `position` carrying `label`
    fn render_node(&self, index: usize, position: Point, label: &str) -> String;

    /// Wrap all node primitives of a drawing
    fn scope(&self, body: &str) -> String;

    /// Preamble lines needed before the drawing, possibly empty
    fn header(&self) -> String;
}

/// Renders edges and self-loops
pub trait EdgePrimitiveRenderer {
    /// Whether edges carry arrow tips
    fn is_directed(&self) -> bool;

    /// A single edge from `from` to `to`, optionally curved
    fn render_line(&self, from: usize, to: usize, bend: Option<Bend>) -> String;

    /// A loop on `node` pointing at `angle` degrees.
    ///
    /// `neighbor_count` controls how wide the loop opens.
    fn render_selfloop(&self, node: usize, angle: f64, neighbor_count: usize) -> String;

    /// Wrap all edge primitives of a drawing
    fn scope(&self, body: &str) -> String;

    /// Preamble lines needed before the drawing, possibly empty
    fn header(&self) -> String;
}

/// Concatenate header texts line by line, keeping only the first occurrence
/// of each line.
///
/// Merging a header with itself yields the header unchanged.
pub fn merge_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen = HashSet::new();
    let mut merged = String::new();
    for line in headers.into_iter().flat_map(str::lines) {
        if line.trim().is_empty() || !seen.insert(line) {
            continue;
        }
        merged.push_str(line);
        merged.push('\n');
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bend_display() {
        assert_eq!(Bend::Left.to_string(), "[bend left=30]");
        assert_eq!(Bend::Right.to_string(), "[bend right=30]");
    }

    #[test]
    fn test_merge_headers_is_idempotent() {
        let header = LineStyle::default().header();
        let once = merge_headers([header.as_str()]);
        let twice = merge_headers([header.as_str(), header.as_str()]);
        assert_eq!(once, header);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_merge_headers_keeps_first_occurrence() {
        let merged = merge_headers(["a\nb\n", "b\nc\n", ""]);
        assert_eq!(merged, "a\nb\nc\n");
    }
}
