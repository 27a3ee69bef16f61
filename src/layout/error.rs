//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur during layout computation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// The graph has fewer real nodes than a layout needs
    #[error("layout needs at least {required} nodes, got {found}")]
    TooFewNodes { required: usize, found: usize },

    /// A numerical stage produced NaN or infinite coordinates
    #[error("layout stage '{stage}' produced non-finite coordinates")]
    NonFinite { stage: &'static str },

    /// Invalid layout configuration
    #[error("invalid layout option '{option}': {reason}")]
    InvalidOption { option: &'static str, reason: String },
}

impl LayoutError {
    /// Create a non-finite coordinate error for a named stage
    pub fn non_finite(stage: &'static str) -> Self {
        Self::NonFinite { stage }
    }

    /// Create an invalid option error
    pub fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}
