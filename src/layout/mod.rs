//! Layout engine for computing node positions and self-loop directions
//!
//! This module takes an adjacency matrix and produces a [`Layout`]: one
//! position per node, centred on the origin and oriented along the graph's
//! principal axis, plus an angle for every self-loop.

pub mod config;
pub mod engine;
pub mod error;
pub mod loops;
pub mod spring;
pub mod transform;
pub mod types;

pub use config::{LayoutConfig, LoopPlacement, DEFAULT_SEED};
pub use engine::compute;
pub use error::LayoutError;
pub use transform::LinearTransform;
pub use types::*;
