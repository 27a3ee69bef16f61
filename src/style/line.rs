//! Edge and self-loop appearance

use super::{Bend, EdgePrimitiveRenderer};

/// Widest half-opening of a self-loop, in degrees
const MAX_LOOP_SPREAD: f64 = 40.0;

/// Millimetres of loop distance per unit of `selfloop_size`
const LOOP_DISTANCE_MM: f64 = 9.0;

/// Style shared by every edge of a drawing
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub directed: bool,
    /// Position of the arrow tip along the edge, from 0 (start) to 1 (end)
    pub arrow_mark_location: f64,
    pub line_width: f64,
    pub selfloop_size: f64,
    /// TikZ arrow tip, e.g. `>` or `Stealth`
    pub arrow_tip: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            directed: true,
            arrow_mark_location: 0.65,
            line_width: 0.3,
            selfloop_size: 0.5,
            arrow_tip: ">".to_string(),
        }
    }
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_arrow_mark_location(mut self, location: f64) -> Self {
        self.arrow_mark_location = location;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_selfloop_size(mut self, size: f64) -> Self {
        self.selfloop_size = size;
        self
    }

    pub fn with_arrow_tip(mut self, tip: impl Into<String>) -> Self {
        self.arrow_tip = tip.into();
        self
    }

    /// Arrow drawn as a plain line ending instead of a decoration
    fn tip_at_end(&self) -> bool {
        self.arrow_mark_location >= 1.0
    }

    fn arrow_option(&self) -> String {
        if !self.directed {
            String::new()
        } else if self.tip_at_end() {
            format!("[-{}]", self.arrow_tip)
        } else {
            "[ar]".to_string()
        }
    }

    /// Half-opening of a loop on a node with `neighbor_count` neighbours.
    ///
    /// Loops narrow as the node gets crowded; a node without neighbours gets
    /// the full spread.
    pub fn loop_spread(neighbor_count: usize) -> f64 {
        if neighbor_count == 0 {
            MAX_LOOP_SPREAD
        } else {
            MAX_LOOP_SPREAD.min(360.0 / neighbor_count as f64)
        }
    }
}

impl EdgePrimitiveRenderer for LineStyle {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn render_line(&self, from: usize, to: usize, bend: Option<Bend>) -> String {
        let bend = bend.map(|b| b.to_string()).unwrap_or_default();
        format!(
            "\\draw [line width={}, {}] {} ({}) to {} ({});\n",
            self.line_width,
            self.color,
            self.arrow_option(),
            from,
            bend,
            to
        )
    }

    fn render_selfloop(&self, node: usize, angle: f64, neighbor_count: usize) -> String {
        let spread = Self::loop_spread(neighbor_count);
        format!(
            "\\draw [line width={}, {}] ({}) edge[out={},in={},distance={}mm] ({});\n",
            self.line_width,
            self.color,
            node,
            angle - spread,
            angle + spread,
            self.selfloop_size * LOOP_DISTANCE_MM,
            node
        )
    }

    fn scope(&self, body: &str) -> String {
        body.to_string()
    }

    fn header(&self) -> String {
        if !self.directed {
            return String::new();
        }
        if self.tip_at_end() {
            return "\\usetikzlibrary{arrows.meta}\n".to_string();
        }
        format!(
            "\\usetikzlibrary{{decorations.markings}}\n\
             \\usetikzlibrary{{arrows.meta}}\n\
             \\tikzset{{ar/.style={{decoration={{markings,mark=at position {} with {{\\arrow{{{}}}}}}},postaction={{decorate}}}}}}\n",
            self.arrow_mark_location, self.arrow_tip
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_directed_line_uses_marking() {
        let line = LineStyle::default().render_line(0, 1, None);
        insta::assert_snapshot!(line.trim_end(), @r"\draw [line width=0.3, black] [ar] (0) to  (1);");
    }

    #[test]
    fn test_bent_line() {
        let line = LineStyle::default().render_line(1, 0, Some(Bend::Left));
        assert_eq!(
            line,
            "\\draw [line width=0.3, black] [ar] (1) to [bend left=30] (0);\n"
        );
    }

    #[test]
    fn test_arrow_at_end_uses_tip() {
        let style = LineStyle::default()
            .with_arrow_mark_location(1.0)
            .with_arrow_tip("Stealth");
        assert_eq!(
            style.render_line(0, 1, None),
            "\\draw [line width=0.3, black] [-Stealth] (0) to  (1);\n"
        );
        assert_eq!(style.header(), "\\usetikzlibrary{arrows.meta}\n");
    }

    #[test]
    fn test_undirected_line_has_no_arrow() {
        let style = LineStyle::default().with_directed(false).with_color("red");
        assert_eq!(
            style.render_line(2, 3, None),
            "\\draw [line width=0.3, red]  (2) to  (3);\n"
        );
        assert_eq!(style.header(), "");
    }

    #[test]
    fn test_selfloop() {
        let loop_ = LineStyle::default().render_selfloop(4, 90.0, 2);
        insta::assert_snapshot!(loop_.trim_end(), @r"\draw [line width=0.3, black] (4) edge[out=50,in=130,distance=4.5mm] (4);");
    }

    #[test]
    fn test_loop_spread() {
        assert_eq!(LineStyle::loop_spread(0), 40.0);
        assert_eq!(LineStyle::loop_spread(1), 40.0);
        assert_eq!(LineStyle::loop_spread(9), 40.0);
        assert_eq!(LineStyle::loop_spread(12), 30.0);
    }

    #[test]
    fn test_marking_header() {
        let header = LineStyle::default().header();
        assert_eq!(
            header,
            "\\usetikzlibrary{decorations.markings}\n\
             \\usetikzlibrary{arrows.meta}\n\
             \\tikzset{ar/.style={decoration={markings,mark=at position 0.65 with {\\arrow{>}}},postaction={decorate}}}\n"
        );
    }
}
