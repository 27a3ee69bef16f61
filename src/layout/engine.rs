//! Layout pipeline: spring simulation, canonical orientation, loop angles

use std::collections::BTreeMap;

use nalgebra::Vector2;
use tracing::{debug, debug_span};

use crate::matrix::{AdjacencyMatrix, MIN_NODES};

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::loops::{loop_angle, loop_direction};
use super::spring;
use super::transform::{normalize, LinearTransform};
use super::types::{Layout, Point};

/// The PCA step aligns the principal axis to this angle; `align_angle` is
/// applied relative to it
const PRINCIPAL_AXIS_ANGLE: f64 = 45.0;

/// Compute node positions and self-loop angles for `matrix`.
///
/// The same matrix and configuration always yield the same layout.
pub fn compute(matrix: &AdjacencyMatrix, config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let span = debug_span!("layout", nodes = matrix.size(), seed = config.seed);
    let _guard = span.enter();

    let n = matrix.size();
    if n < MIN_NODES {
        return Err(LayoutError::TooFewNodes {
            required: MIN_NODES,
            found: n,
        });
    }
    if !(config.scale.is_finite() && config.scale > 0.0) {
        return Err(LayoutError::invalid_option(
            "scale",
            format!("must be a positive number, got {}", config.scale),
        ));
    }
    if !config.align_angle.is_finite() {
        return Err(LayoutError::invalid_option(
            "align_angle",
            format!("must be finite, got {}", config.align_angle),
        ));
    }

    let loop_owners: Vec<usize> = matrix.self_loops().collect();
    let mut edges = matrix.undirected_edges();

    // Loop slots sit after the real nodes, one per looped node
    let total = if config.loops_are_nodes {
        for (slot, &owner) in loop_owners.iter().enumerate() {
            edges.push((owner, n + slot));
        }
        n + loop_owners.len()
    } else {
        n
    };

    let mut positions = spring::simulate(total, &edges, config.seed, config.iterations);
    normalize(&mut positions, n);
    ensure_finite(&positions, "normalize")?;

    let transform = LinearTransform::principal_axis(&positions, config.scale)
        .then(LinearTransform::rotation(config.align_angle - PRINCIPAL_AXIS_ANGLE));
    for p in positions.iter_mut() {
        *p = transform.apply(*p);
    }
    ensure_finite(&positions, "orientation")?;

    let mut loops = BTreeMap::new();
    for (slot, &owner) in loop_owners.iter().enumerate() {
        let direction = if config.loops_are_nodes {
            positions[n + slot] - positions[owner]
        } else {
            let neighbors: Vec<Vector2<f64>> = matrix
                .undirected_neighbors(owner)
                .map(|j| positions[j] - positions[owner])
                .collect();
            loop_direction(&neighbors, config.loop_placement)
        };
        loops.insert(owner, loop_angle(direction));
    }

    debug!(loops = loops.len(), "layout complete");
    Ok(Layout {
        nodes: positions[..n].iter().map(|&p| Point::from(p)).collect(),
        loops,
    })
}

fn ensure_finite(positions: &[Vector2<f64>], stage: &'static str) -> Result<(), LayoutError> {
    if positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        Ok(())
    } else {
        Err(LayoutError::non_finite(stage))
    }
}
