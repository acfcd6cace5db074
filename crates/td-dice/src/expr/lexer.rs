//! Tokens of the dice expression grammar.

use logos::Logos;
use std::fmt;
use std::ops::Range;

use super::CompareOp;

/// Token of a dice expression.
///
/// Whitespace is kept as a token because it is significant: it may only
/// appear around a comparison operator or after a repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// An unsigned run of ASCII digits, kept as text so that oversized
    /// values can be reported against the right ceiling.
    Number(&'src str),
    /// The die marker `d`.
    Die,
    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// One of the six comparison operators.
    Compare(CompareOp),
    /// A run of whitespace.
    Space,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Die => write!(f, "d"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Compare(op) => write!(f, "{op}"),
            Token::Space => write!(f, "whitespace"),
        }
    }
}

#[derive(Logos, Debug)]
enum RawToken {
    #[regex(r"[0-9]+")]
    Number,

    #[token("d")]
    Die,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token(">=")]
    Ge,

    #[token(">")]
    Gt,

    #[token("<=")]
    Le,

    #[token("<")]
    Lt,

    #[token("==")]
    Eq,

    #[token("!=")]
    Ne,

    #[regex(r"\s+")]
    Space,
}

/// Lex a dice expression.
///
/// Stops at the first character that cannot start a token and returns its
/// byte range, since any such character makes the expression invalid.
pub fn lex(source: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, Range<usize>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let raw = result.map_err(|()| span.clone())?;
        let token = match raw {
            RawToken::Number => Token::Number(lexer.slice()),
            RawToken::Die => Token::Die,
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Ge => Token::Compare(CompareOp::Ge),
            RawToken::Gt => Token::Compare(CompareOp::Gt),
            RawToken::Le => Token::Compare(CompareOp::Le),
            RawToken::Lt => Token::Compare(CompareOp::Lt),
            RawToken::Eq => Token::Compare(CompareOp::Eq),
            RawToken::Ne => Token::Compare(CompareOp::Ne),
            RawToken::Space => Token::Space,
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}

/// Lex only the repeat prefix `[+]<digits><whitespace>` of `source`.
///
/// Returns the digits and the remaining text after the whitespace, or
/// `None` when the text does not start with a repeat prefix or nothing
/// follows it.
pub fn split_repeat(source: &str) -> Option<(&str, &str)> {
    let mut lexer = RawToken::lexer(source);

    let mut next = lexer.next()?.ok()?;
    if matches!(next, RawToken::Plus) {
        next = lexer.next()?.ok()?;
    }
    if !matches!(next, RawToken::Number) {
        return None;
    }
    let digits = lexer.slice();

    if !matches!(lexer.next()?.ok()?, RawToken::Space) {
        return None;
    }
    let rest = lexer.remainder();
    if rest.is_empty() {
        return None;
    }
    Some((digits, rest))
}
