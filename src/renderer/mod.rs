//! TikZ renderer for generating output from an adjacency matrix and its layout
//!
//! This module walks the matrix, classifies its edges and produces TikZ
//! source, either as a bare drawing or as a standalone document.

pub mod document;
pub mod tikz;

pub use document::standalone_document;
pub use tikz::{render, Drawing, LabelMode, TikzGrapher};
