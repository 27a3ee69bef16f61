//! Parser for adjacency matrix text

mod grammar;
pub mod lexer;

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

pub use grammar::{parse, parse_grid};

/// Supported textual matrix encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixFormat {
    /// One row per line, comma separated
    #[default]
    Csv,
    /// Nested lists with square brackets: `[[0,1],[1,0]]`
    Python,
    /// Nested lists with braces: `{{0,1},{1,0}}`
    Mathematica,
}

impl MatrixFormat {
    pub const ALL: [MatrixFormat; 3] = [
        MatrixFormat::Csv,
        MatrixFormat::Python,
        MatrixFormat::Mathematica,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MatrixFormat::Csv => "csv",
            MatrixFormat::Python => "python",
            MatrixFormat::Mathematica => "mathematica",
        }
    }
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatrixFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}
