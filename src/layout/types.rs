//! Core types for the layout engine

use std::collections::BTreeMap;

use nalgebra::Vector2;

/// A 2D point in the drawing plane (y axis pointing up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vector2<f64> {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

/// The computed layout of one graph
///
/// `nodes[i]` is the position of node `i`. `loops` maps every node carrying
/// a self-loop to the direction of that loop, in degrees within `[0, 360)`
/// measured counter-clockwise from the positive x axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub nodes: Vec<Point>,
    pub loops: BTreeMap<usize, f64>,
}

impl Layout {
    /// Position of a node, if it exists
    pub fn node(&self, index: usize) -> Option<Point> {
        self.nodes.get(index).copied()
    }

    /// Loop direction for a node, if it carries a self-loop
    pub fn loop_angle(&self, index: usize) -> Option<f64> {
        self.loops.get(&index).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_conversion() {
        let p = Point::new(3.0, -4.0);
        let v: Vector2<f64> = p.into();
        assert_eq!(Point::from(v), p);
        assert_eq!(p.norm(), 5.0);
    }

    #[test]
    fn test_layout_lookup() {
        let mut layout = Layout {
            nodes: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            loops: BTreeMap::new(),
        };
        layout.loops.insert(1, 180.0);
        assert_eq!(layout.node_count(), 2);
        assert_eq!(layout.node(1), Some(Point::new(1.0, 0.0)));
        assert_eq!(layout.node(2), None);
        assert_eq!(layout.loop_angle(1), Some(180.0));
        assert_eq!(layout.loop_angle(0), None);
    }
}
