//! Error types for matrix ingestion

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// The matrix text could not be tokenized or parsed into a numeric grid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Format error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Unrecognized character {found:?} at {span:?}")]
    InvalidCharacter { span: Span, found: String },

    #[error("Unrecognized matrix format '{0}' (supported: csv, python, mathematica)")]
    UnknownFormat(String),
}

impl FormatError {
    /// Source span of the error, when it points into the matrix text
    pub fn span(&self) -> Option<&Span> {
        match self {
            FormatError::Syntax { span, .. } | FormatError::InvalidCharacter { span, .. } => {
                Some(span)
            }
            FormatError::UnknownFormat(_) => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };
        let label = match self {
            FormatError::Syntax {
                message, expected, ..
            } if !expected.is_empty() => {
                format!("{}\nExpected: {}", message, expected.join(", "))
            }
            FormatError::Syntax { message, .. } => message.clone(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("cannot read adjacency matrix")
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for FormatError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
            #[allow(unreachable_patterns)]
            other => format!("{:?}", other),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                _ => None,
            })
            .collect();

        FormatError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Number(n) => format!("number {}", n),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Newline => "line break".to_string(),
    }
}

/// The parsed grid is not a usable adjacency matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("adjacency matrix must be square, got {rows} rows of {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{count} values cannot be arranged into a square matrix")]
    NotPerfectSquare { count: usize },

    #[error("graph must have at least two nodes, got {size}")]
    TooSmall { size: usize },
}

/// Any failure while turning matrix text into an adjacency matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("format errors: {}", format_errors(.0))]
    Format(Vec<FormatError>),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
}

impl From<Vec<FormatError>> for MatrixError {
    fn from(errors: Vec<FormatError>) -> Self {
        MatrixError::Format(errors)
    }
}

impl From<FormatError> for MatrixError {
    fn from(error: FormatError) -> Self {
        MatrixError::Format(vec![error])
    }
}

fn format_errors(errors: &[FormatError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
