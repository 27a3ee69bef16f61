//! Lexer for adjacency matrix text using logos

use logos::Logos;

use crate::error::{FormatError, Span};

fn number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse::<f64>().ok()
}

fn quoted_number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    let s = lex.slice();
    s[1..s.len() - 1].trim().parse::<f64>().ok()
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Delimiters
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(",")]
    Comma,

    // Row separator for delimited grids; dropped for bracketed formats
    #[regex(r"\r?\n")]
    Newline,

    // Literals
    #[regex(r"-?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", number)]
    #[regex(r#""[ \t]*-?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[ \t]*""#, quoted_number)]
    Number(f64),
}

/// Lex input string into tokens with spans
///
/// Characters that are not part of any token are reported as
/// [`FormatError::InvalidCharacter`].
pub fn lex(input: &str) -> impl Iterator<Item = Result<(Token, Span), FormatError>> + '_ {
    Token::lexer(input).spanned().map(|(tok, span)| match tok {
        Ok(t) => Ok((t, span)),
        Err(()) => Err(FormatError::InvalidCharacter {
            found: input[span.clone()].to_string(),
            span,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|r| r.unwrap().0).collect()
    }

    #[test]
    fn test_csv_row() {
        assert_eq!(
            tokens("0, 1,2\n"),
            vec![
                Token::Number(0.0),
                Token::Comma,
                Token::Number(1.0),
                Token::Comma,
                Token::Number(2.0),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            tokens("[[0,1]]"),
            vec![
                Token::BracketOpen,
                Token::BracketOpen,
                Token::Number(0.0),
                Token::Comma,
                Token::Number(1.0),
                Token::BracketClose,
                Token::BracketClose,
            ]
        );
        assert_eq!(
            tokens("{{1}}"),
            vec![
                Token::BraceOpen,
                Token::BraceOpen,
                Token::Number(1.0),
                Token::BraceClose,
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            tokens("-2 0.5 .25 1e3"),
            vec![
                Token::Number(-2.0),
                Token::Number(0.5),
                Token::Number(0.25),
                Token::Number(1000.0),
            ]
        );
    }

    #[test]
    fn test_quoted_numbers() {
        assert_eq!(
            tokens(r#"["1", " 0 "]"#),
            vec![
                Token::BracketOpen,
                Token::Number(1.0),
                Token::Comma,
                Token::Number(0.0),
                Token::BracketClose,
            ]
        );
    }

    #[test]
    fn test_crlf_is_one_newline() {
        assert_eq!(
            tokens("1\r\n0"),
            vec![Token::Number(1.0), Token::Newline, Token::Number(0.0)]
        );
    }

    #[test]
    fn test_invalid_character_reported() {
        let errors: Vec<_> = lex("0,a").filter_map(|r| r.err()).collect();
        assert_eq!(
            errors,
            vec![FormatError::InvalidCharacter {
                span: 2..3,
                found: "a".to_string(),
            }]
        );
    }
}
