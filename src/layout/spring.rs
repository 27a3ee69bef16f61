//! Fruchterman-Reingold spring simulation
//!
//! Nodes repel each other like point charges and edges pull their endpoints
//! together like springs. Starting positions are drawn from a seeded RNG and
//! the temperature cools linearly, so the same graph and seed always produce
//! the same embedding.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Distances below this are clamped so coincident nodes still push apart
const MIN_DISTANCE: f64 = 0.01;

/// Mean displacement below which the simulation stops early
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Run the spring simulation on `node_count` nodes joined by undirected `edges`.
///
/// Returns one position per node. Positions are not normalized.
pub fn simulate(
    node_count: usize,
    edges: &[(usize, usize)],
    seed: u64,
    iterations: usize,
) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<Vector2<f64>> = (0..node_count)
        .map(|_| Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();

    if node_count < 2 {
        return pos;
    }

    let mut adjacent = vec![false; node_count * node_count];
    for &(a, b) in edges {
        adjacent[a * node_count + b] = true;
        adjacent[b * node_count + a] = true;
    }

    // Optimal distance between nodes
    let k = (1.0 / node_count as f64).sqrt();

    // Initial temperature is a tenth of the widest extent of the starting cloud
    let extent = |axis: usize| {
        let (min, max) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[axis]), hi.max(p[axis]))
        });
        max - min
    };
    let mut temperature = extent(0).max(extent(1)) * 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    let mut steps = 0;
    for _ in 0..iterations {
        steps += 1;
        let mut moved_sq = 0.0_f64;
        let mut step: Vec<Vector2<f64>> = vec![Vector2::zeros(); node_count];

        for i in 0..node_count {
            let mut displacement: Vector2<f64> = Vector2::zeros();
            for j in 0..node_count {
                if i == j {
                    continue;
                }
                let delta = pos[i] - pos[j];
                let distance = delta.norm().max(MIN_DISTANCE);
                let attraction = if adjacent[i * node_count + j] {
                    distance / k
                } else {
                    0.0
                };
                displacement += delta * (k * k / (distance * distance) - attraction);
            }

            let length = displacement.norm();
            let length = if length < MIN_DISTANCE { 0.1 } else { length };
            step[i] = displacement * (temperature / length);
            moved_sq += step[i].norm_squared();
        }

        for (p, s) in pos.iter_mut().zip(&step) {
            *p += *s;
        }
        temperature -= cooling;

        let mean_move = moved_sq.sqrt() / node_count as f64;
        trace!(step = steps, mean_move, "spring step");
        if mean_move < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    debug!(nodes = node_count, edges = edges.len(), steps, seed, "spring layout done");
    pos
}
