//! Node appearance

use crate::layout::Point;

use super::NodePrimitiveRenderer;

/// Largest node scale accepted; bigger nodes swallow their edges
pub const MAX_NODE_SCALE: f64 = 2.0;

/// Upper bound of the automatic outer separation, in centimetres
const MAX_AUTO_OUTER_SEP: f64 = 0.2;

/// Style shared by every node of a drawing
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    /// TikZ shape name
    pub shape: String,
    pub line_color: String,
    pub fill_color: String,
    /// Node size relative to TikZ defaults, at most [`MAX_NODE_SCALE`]
    pub scale: f64,
    /// Gap between a node's border and its edges in centimetres; `None`
    /// derives it from `scale`
    pub outer_sep: Option<f64>,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            shape: "circle".to_string(),
            line_color: "black".to_string(),
            fill_color: "black".to_string(),
            scale: 0.3,
            outer_sep: None,
        }
    }
}

impl NodeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = shape.into();
        self
    }

    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }

    pub fn with_fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = color.into();
        self
    }

    /// Set the node scale; values above [`MAX_NODE_SCALE`] are capped
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale.min(MAX_NODE_SCALE);
        self
    }

    /// Set a fixed outer separation, or `None` for automatic
    pub fn with_outer_sep(mut self, outer_sep: Option<f64>) -> Self {
        self.outer_sep = outer_sep;
        self
    }

    /// Outer separation actually written to the scope.
    ///
    /// Automatic separation shrinks as nodes grow so large nodes do not push
    /// their edges away.
    pub fn effective_outer_sep(&self) -> f64 {
        match self.outer_sep {
            Some(sep) => sep,
            None => MAX_AUTO_OUTER_SEP.min(0.1 / self.scale),
        }
    }
}

impl NodePrimitiveRenderer for NodeStyle {
    fn render_node(&self, index: usize, position: Point, label: &str) -> String {
        format!(
            "\\node ({}) at ({},{}) {{ {} }};\n",
            index, position.x, position.y, label
        )
    }

    fn scope(&self, body: &str) -> String {
        format!(
            "\\begin{{scope}}[every node/.style={{ shape={},draw={},fill={},scale={},outer sep={}cm }}]\n{}\n\\end{{scope}}\n\n",
            self.shape,
            self.line_color,
            self.fill_color,
            self.scale,
            self.effective_outer_sep(),
            body
        )
    }

    fn header(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_node() {
        let style = NodeStyle::default();
        let node = style.render_node(2, Point::new(1.5, -0.25), "2");
        insta::assert_snapshot!(node.trim_end(), @r"\node (2) at (1.5,-0.25) { 2 };");
    }

    #[test]
    fn test_render_node_without_label() {
        let node = NodeStyle::default().render_node(0, Point::new(0.0, 1.0), "");
        assert_eq!(node, "\\node (0) at (0,1) {  };\n");
    }

    #[test]
    fn test_scope_with_auto_outer_sep() {
        let style = NodeStyle::default().with_fill_color("white");
        let scoped = style.scope("BODY");
        assert_eq!(
            scoped,
            "\\begin{scope}[every node/.style={ shape=circle,draw=black,fill=white,scale=0.3,outer sep=0.2cm }]\nBODY\n\\end{scope}\n\n"
        );
    }

    #[test]
    fn test_auto_outer_sep_shrinks_with_scale() {
        let style = NodeStyle::default().with_scale(1.0);
        assert_eq!(style.effective_outer_sep(), 0.1);
        let fixed = style.with_outer_sep(Some(0.05));
        assert_eq!(fixed.effective_outer_sep(), 0.05);
    }

    #[test]
    fn test_scale_is_capped() {
        assert_eq!(NodeStyle::default().with_scale(5.0).scale, MAX_NODE_SCALE);
    }

    #[test]
    fn test_header_is_empty() {
        assert_eq!(NodeStyle::default().header(), "");
    }
}
