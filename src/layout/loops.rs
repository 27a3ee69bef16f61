//! Self-loop orientation
//!
//! A loop is drawn on the side of its node facing away from the node's
//! neighbours. The direction is derived from the vectors pointing from the
//! node to each neighbour and reported as an angle the renderer can turn into
//! arc in/out angles.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use nalgebra::Vector2;
use tracing::debug;

use super::config::LoopPlacement;

/// Below this length a direction vector carries no orientation
const EPSILON: f64 = 1e-12;

/// Direction of a loop on a node with no neighbours (straight up)
pub const ISOLATED_LOOP_ANGLE: f64 = 90.0;

/// Direction, relative to the node, in which its self-loop should point.
///
/// `neighbors` are vectors from the node to each of its (non-self)
/// neighbours.
/// - no neighbours: straight up
/// - one neighbour: directly away from it
/// - two neighbours: opposite their sum
/// - three or more: opposite their mean, or the bisector of the widest gap
///   under [`LoopPlacement::LargestGap`]
///
/// A zero resultant (for example two neighbours on opposite sides) falls back
/// to the widest-gap bisector.
pub fn loop_direction(neighbors: &[Vector2<f64>], placement: LoopPlacement) -> Vector2<f64> {
    let mut sorted = neighbors.to_vec();
    sorted.sort_by(compare_around_circle);

    let direction = match (sorted.len(), placement) {
        (0, _) => return Vector2::new(0.0, 1.0),
        (1, _) => -sorted[0],
        (2, _) => -(sorted[0] + sorted[1]) / 2.0,
        (_, LoopPlacement::Mean) => {
            -sorted.iter().fold(Vector2::<f64>::zeros(), |acc, v| acc + v) / sorted.len() as f64
        }
        (_, LoopPlacement::LargestGap) => largest_gap_direction(&sorted),
    };

    if direction.norm() > EPSILON {
        return direction;
    }

    debug!(neighbors = sorted.len(), "loop resultant vanished, bisecting widest gap");
    let fallback = largest_gap_direction(&sorted);
    if fallback.norm() > EPSILON {
        fallback
    } else {
        Vector2::new(0.0, 1.0)
    }
}

/// Unit vector bisecting the widest angular gap between the given directions.
///
/// Zero vectors are ignored; with none left the result is zero.
pub fn largest_gap_direction(vectors: &[Vector2<f64>]) -> Vector2<f64> {
    let mut angles: Vec<f64> = vectors
        .iter()
        .filter(|v| v.norm() > EPSILON)
        .map(|v| v.y.atan2(v.x).rem_euclid(TAU))
        .collect();
    if angles.is_empty() {
        return Vector2::zeros();
    }
    angles.sort_by(f64::total_cmp);

    let mut best_start = angles[0];
    let mut best_gap = f64::NEG_INFINITY;
    for (i, &start) in angles.iter().enumerate() {
        let end = match angles.get(i + 1) {
            Some(&next) => next,
            None => angles[0] + TAU,
        };
        let gap = end - start;
        if gap > best_gap {
            best_gap = gap;
            best_start = start;
        }
    }

    let bisector = best_start + best_gap / 2.0;
    Vector2::new(bisector.cos(), bisector.sin())
}

/// Angle of `direction` in degrees within `[0, 360)`, counter-clockwise from +x.
///
/// A zero vector has no angle and maps to [`ISOLATED_LOOP_ANGLE`].
pub fn loop_angle(direction: Vector2<f64>) -> f64 {
    let norm = direction.norm();
    if norm.is_nan() || norm <= EPSILON {
        return ISOLATED_LOOP_ANGLE;
    }
    let from_x = (direction.x / norm).clamp(-1.0, 1.0).acos();
    let radians = if direction.y < 0.0 { TAU - from_x } else { from_x };
    let degrees = radians.to_degrees();
    if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Order vectors counter-clockwise starting at angle 0: upper half-plane
/// (y >= 0) first, then lower, each by angle against the x axis.
fn compare_around_circle(a: &Vector2<f64>, b: &Vector2<f64>) -> Ordering {
    let key = |v: &Vector2<f64>| {
        let norm = v.norm();
        let angle = if norm > EPSILON {
            (v.x / norm).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        (v.y < 0.0, angle)
    };
    let (a_lower, a_angle) = key(a);
    let (b_lower, b_angle) = key(b);
    a_lower
        .cmp(&b_lower)
        .then_with(|| a_angle.total_cmp(&b_angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn angle_of(neighbors: &[(f64, f64)], placement: LoopPlacement) -> f64 {
        let vectors: Vec<_> = neighbors
            .iter()
            .map(|&(x, y)| Vector2::new(x, y))
            .collect();
        loop_angle(loop_direction(&vectors, placement))
    }

    #[test]
    fn test_no_neighbors_points_up() {
        assert!(approx_eq(angle_of(&[], LoopPlacement::Mean), 90.0));
    }

    #[test]
    fn test_one_neighbor_points_away() {
        assert!(approx_eq(angle_of(&[(1.0, 0.0)], LoopPlacement::Mean), 180.0));
        assert!(approx_eq(angle_of(&[(0.0, 2.0)], LoopPlacement::Mean), 270.0));
    }

    #[test]
    fn test_two_neighbors_opposite_sum() {
        // Neighbours right and up: loop goes down-left
        let angle = angle_of(&[(1.0, 0.0), (0.0, 1.0)], LoopPlacement::Mean);
        assert!(approx_eq(angle, 225.0), "got {}", angle);
    }

    #[test]
    fn test_two_opposite_neighbors_use_gap() {
        let angle = angle_of(&[(1.0, 0.0), (-1.0, 0.0)], LoopPlacement::Mean);
        assert!(approx_eq(angle, 90.0), "got {}", angle);
    }

    #[test]
    fn test_three_neighbors_mean() {
        // Three neighbours clustered on the right: loop points left
        let angle = angle_of(&[(1.0, 0.5), (1.0, 0.0), (1.0, -0.5)], LoopPlacement::Mean);
        assert!(approx_eq(angle, 180.0), "got {}", angle);
    }

    #[test]
    fn test_largest_gap_differs_from_mean() {
        // Neighbours at 0°, 90° and 180° agree on 270°; an uneven spread
        // separates the two policies
        let neighbors = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];
        let mean = angle_of(&neighbors, LoopPlacement::Mean);
        let gap = angle_of(&neighbors, LoopPlacement::LargestGap);
        assert!(approx_eq(mean, 270.0), "mean {}", mean);
        assert!(approx_eq(gap, 270.0), "gap {}", gap);

        let skewed = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.1), (-1.0, 0.2)];
        let mean = angle_of(&skewed, LoopPlacement::Mean);
        let gap = angle_of(&skewed, LoopPlacement::LargestGap);
        assert!((mean - gap).abs() > 1.0, "mean {} gap {}", mean, gap);
    }

    #[test]
    fn test_symmetric_star_falls_back_to_gap() {
        let neighbors = [(1.0, 0.0), (-0.5, 0.75_f64.sqrt()), (-0.5, -(0.75_f64.sqrt()))];
        let angle = angle_of(&neighbors, LoopPlacement::Mean);
        assert!(angle.is_finite());
        assert!((0.0..360.0).contains(&angle));
    }

    #[test]
    fn test_loop_angle_range() {
        assert!(approx_eq(loop_angle(Vector2::new(1.0, 0.0)), 0.0));
        assert!(approx_eq(loop_angle(Vector2::new(0.0, -1.0)), 270.0));
        assert!(approx_eq(loop_angle(Vector2::new(-1.0, 0.0)), 180.0));
        assert!(approx_eq(loop_angle(Vector2::zeros()), ISOLATED_LOOP_ANGLE));
    }

    #[test]
    fn test_sort_order_starts_at_zero_and_goes_counter_clockwise() {
        let mut vectors = vec![
            Vector2::new(0.0, -1.0),
            Vector2::new(-1.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ];
        vectors.sort_by(compare_around_circle);
        assert_eq!(
            vectors,
            vec![
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
                Vector2::new(-1.0, 0.0),
                Vector2::new(0.0, -1.0),
            ]
        );
    }
}
