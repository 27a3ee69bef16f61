//! Matrix grammars using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use tracing::debug;

use crate::error::{FormatError, MatrixError, Span};
use crate::matrix::AdjacencyMatrix;
use crate::parser::lexer::{lex, Token};
use crate::parser::MatrixFormat;

/// Run a token parser over a lexed token list, the same way for every grammar
macro_rules! parse_tokens {
    ($len:expr, $tokens:expr, $parser:expr) => {{
        let len: usize = $len;
        let token_iter = $tokens
            .into_iter()
            .map(|(tok, span): (Token, Span)| (tok, SimpleSpan::from(span)));

        // Turn the token iterator into a stream that chumsky can use
        let token_stream =
            Stream::from_iter(token_iter).spanned((len..len).into());

        $parser
            .parse(token_stream)
            .into_result()
            .map_err(|errs| errs.into_iter().map(FormatError::from).collect::<Vec<_>>())
    }};
}

/// One element of the outer list in a bracketed matrix
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Value(f64, Span),
    Row(Vec<f64>, Span),
}

/// Parse matrix text in the given format into a validated adjacency matrix
pub fn parse(input: &str, format: MatrixFormat) -> Result<AdjacencyMatrix, MatrixError> {
    let rows = parse_grid(input, format)?;
    debug!(?format, rows = rows.len(), "parsed matrix text");
    Ok(AdjacencyMatrix::from_rows(&rows)?)
}

/// Parse matrix text into numeric rows without shape validation.
///
/// A flat bracketed list is reshaped into a square grid here.
pub fn parse_grid(input: &str, format: MatrixFormat) -> Result<Vec<Vec<f64>>, MatrixError> {
    let tokens = tokenize(input, format)?;

    match format {
        MatrixFormat::Csv => {
            let rows = parse_tokens!(input.len(), tokens, csv_parser())?;
            Ok(rows)
        }
        MatrixFormat::Python => {
            let entries = parse_tokens!(
                input.len(),
                tokens,
                list_parser(Token::BracketOpen, Token::BracketClose)
            )?;
            entries_to_rows(entries)
        }
        MatrixFormat::Mathematica => {
            let entries = parse_tokens!(
                input.len(),
                tokens,
                list_parser(Token::BraceOpen, Token::BraceClose)
            )?;
            entries_to_rows(entries)
        }
    }
}

fn tokenize(input: &str, format: MatrixFormat) -> Result<Vec<(Token, Span)>, Vec<FormatError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for item in lex(input) {
        match item {
            Ok((Token::Newline, _)) if format != MatrixFormat::Csv => {}
            Ok(tok) => tokens.push(tok),
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> Span {
    e.start()..e.end()
}

/// Delimited grid: one row per line, entries separated by commas
fn csv_parser<'a, I>() -> impl Parser<'a, I, Vec<Vec<f64>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let row = number
        .separated_by(just(Token::Comma))
        .at_least(1)
        .allow_trailing()
        .collect::<Vec<_>>();

    let line_breaks = just(Token::Newline).repeated();

    line_breaks
        .clone()
        .ignore_then(
            row.separated_by(just(Token::Newline).repeated().at_least(1))
                .at_least(1)
                .allow_trailing()
                .collect::<Vec<_>>(),
        )
        .then_ignore(line_breaks)
        .then_ignore(end())
}

/// Nested list: `[[0,1],[1,0]]` or a flat `[0,1,1,0]`, with the given delimiters
fn list_parser<'a, I>(
    open: Token,
    close: Token,
) -> impl Parser<'a, I, Vec<Entry>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let row = number
        .clone()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(open.clone()), just(close.clone()))
        .map_with(|values, e| Entry::Row(values, span_range(&e.span())));

    let value = number.map_with(|n, e| Entry::Value(n, span_range(&e.span())));

    choice((row, value))
        .separated_by(just(Token::Comma))
        .at_least(1)
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(open), just(close))
        .then_ignore(end())
}

fn entries_to_rows(entries: Vec<Entry>) -> Result<Vec<Vec<f64>>, MatrixError> {
    let flat = matches!(entries.first(), Some(Entry::Value(..)));
    let mut values = Vec::new();
    let mut rows = Vec::new();

    for entry in entries {
        match (entry, flat) {
            (Entry::Value(v, _), true) => values.push(v),
            (Entry::Row(r, _), false) => rows.push(r),
            (Entry::Row(_, span), true) => {
                return Err(mixed_nesting(span, "a number"));
            }
            (Entry::Value(_, span), false) => {
                return Err(mixed_nesting(span, "a row"));
            }
        }
    }

    if flat {
        let matrix = AdjacencyMatrix::from_flat(&values)?;
        return Ok(matrix
            .rows()
            .into_iter()
            .map(|r| r.into_iter().map(f64::from).collect())
            .collect());
    }
    Ok(rows)
}

fn mixed_nesting(span: Span, expected: &str) -> MatrixError {
    FormatError::Syntax {
        span,
        message: "rows and bare numbers cannot be mixed".to_string(),
        expected: vec![expected.to_string()],
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    #[test]
    fn test_csv_grid() {
        let rows = parse_grid("0,1,0\n1,0,1\n0,1,0\n", MatrixFormat::Csv).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 1.0],
                vec![0.0, 1.0, 0.0]
            ]
        );
    }

    #[test]
    fn test_csv_ignores_blank_lines() {
        let m = parse("\n0,1\n\n\n1,0\n\n", MatrixFormat::Csv).unwrap();
        assert_eq!(m.size(), 2);
    }

    #[test]
    fn test_python_nested_list() {
        let m = parse("[[0, 1], [0, 0]]", MatrixFormat::Python).unwrap();
        assert!(m.get(0, 1));
        assert!(!m.get(1, 0));
    }

    #[test]
    fn test_python_multiline() {
        let m = parse("[\n  [0, 1],\n  [1, 0],\n]", MatrixFormat::Python).unwrap();
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_mathematica_braces() {
        let m = parse("{{1,0},{0,0}}", MatrixFormat::Mathematica).unwrap();
        assert!(m.has_self_loop(0));
    }

    #[test]
    fn test_flat_list_reshaped() {
        let m = parse("[0,1,1,0]", MatrixFormat::Python).unwrap();
        assert!(m.get(0, 1) && m.get(1, 0));
    }

    #[test]
    fn test_flat_list_not_square() {
        assert_eq!(
            parse("[0,1,1]", MatrixFormat::Python),
            Err(MatrixError::Shape(ShapeError::NotPerfectSquare { count: 3 }))
        );
    }

    #[test]
    fn test_wrong_delimiters_for_format() {
        let err = parse("{{0,1},{1,0}}", MatrixFormat::Python).unwrap_err();
        assert!(matches!(err, MatrixError::Format(_)));
    }

    #[test]
    fn test_mixed_nesting_rejected() {
        let err = parse("[[0,1],1]", MatrixFormat::Python).unwrap_err();
        assert!(matches!(err, MatrixError::Format(_)));
    }

    #[test]
    fn test_non_numeric_text() {
        let err = parse("a,b\nc,d", MatrixFormat::Csv).unwrap_err();
        match err {
            MatrixError::Format(errors) => assert_eq!(errors.len(), 4),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_format_error() {
        assert!(matches!(
            parse("", MatrixFormat::Csv),
            Err(MatrixError::Format(_))
        ));
        assert!(matches!(
            parse("[]", MatrixFormat::Python),
            Err(MatrixError::Format(_))
        ));
    }

    #[test]
    fn test_single_node_is_shape_error() {
        assert_eq!(
            parse("1", MatrixFormat::Csv),
            Err(MatrixError::Shape(ShapeError::TooSmall { size: 1 }))
        );
    }

    #[test]
    fn test_non_square_is_shape_error() {
        assert_eq!(
            parse("0,1,0\n1,0,0", MatrixFormat::Csv),
            Err(MatrixError::Shape(ShapeError::NotSquare { rows: 2, cols: 3 }))
        );
    }
}
