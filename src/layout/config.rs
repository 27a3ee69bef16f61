//! Configuration for the layout engine

use std::fmt;
use std::str::FromStr;

/// Seed used when none is given, so repeated renders agree
pub const DEFAULT_SEED: u64 = 1;

/// How a self-loop is oriented when its node has three or more neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPlacement {
    /// Opposite the mean of the neighbour directions
    #[default]
    Mean,
    /// Bisecting the widest angular gap between neighbours
    LargestGap,
}

impl fmt::Display for LoopPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopPlacement::Mean => f.write_str("mean"),
            LoopPlacement::LargestGap => f.write_str("largest_gap"),
        }
    }
}

impl FromStr for LoopPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mean" => Ok(LoopPlacement::Mean),
            "largest_gap" | "largest-gap" => Ok(LoopPlacement::LargestGap),
            other => Err(format!(
                "unknown loop placement '{}' (expected mean or largest_gap)",
                other
            )),
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Final orientation of the principal axis, in degrees
    pub align_angle: f64,

    /// Seed for the spring simulation
    pub seed: u64,

    /// Overall scale of the drawing
    pub scale: f64,

    /// Simulate self-loops as extra nodes instead of placing them afterwards
    pub loops_are_nodes: bool,

    /// Policy for self-loops on nodes with three or more neighbours
    pub loop_placement: LoopPlacement,

    /// Maximum number of spring simulation steps
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            align_angle: 0.0,
            seed: DEFAULT_SEED,
            scale: 3.0,
            loops_are_nodes: false,
            loop_placement: LoopPlacement::Mean,
            iterations: 50,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alignment angle in degrees
    pub fn with_align_angle(mut self, degrees: f64) -> Self {
        self.align_angle = degrees;
        self
    }

    /// Set the simulation seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the drawing scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Treat self-loops as simulated nodes
    pub fn with_loops_are_nodes(mut self, loops_are_nodes: bool) -> Self {
        self.loops_are_nodes = loops_are_nodes;
        self
    }

    /// Set the self-loop placement policy
    pub fn with_loop_placement(mut self, placement: LoopPlacement) -> Self {
        self.loop_placement = placement;
        self
    }

    /// Set the maximum number of simulation steps
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.align_angle, 0.0);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.scale, 3.0);
        assert!(!config.loops_are_nodes);
        assert_eq!(config.loop_placement, LoopPlacement::Mean);
        assert_eq!(config.iterations, 50);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_align_angle(90.0)
            .with_seed(7)
            .with_scale(1.5)
            .with_loops_are_nodes(true)
            .with_loop_placement(LoopPlacement::LargestGap);

        assert_eq!(config.align_angle, 90.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.scale, 1.5);
        assert!(config.loops_are_nodes);
        assert_eq!(config.loop_placement, LoopPlacement::LargestGap);
    }

    #[test]
    fn test_loop_placement_parse() {
        assert_eq!("mean".parse(), Ok(LoopPlacement::Mean));
        assert_eq!("largest_gap".parse(), Ok(LoopPlacement::LargestGap));
        assert!("widest".parse::<LoopPlacement>().is_err());
        assert_eq!(LoopPlacement::LargestGap.to_string(), "largest_gap");
    }
}
