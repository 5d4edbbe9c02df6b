use nom::error::{ContextError, ErrorKind, ParseError as NomParseError};
use thiserror::Error;

/// A nom error that, when alternatives fail, keeps the one which got furthest into the input
#[derive(Debug)]
pub struct GreedyError<I>(Vec<(I, GreedyErrorKind)>);

#[derive(Debug)]
enum GreedyErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
    Char(char),
}

pub trait Length {
    fn length(&self) -> usize;
}

impl Length for &str {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<I> NomParseError<I> for GreedyError<I>
where
    I: Length,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self(vec![(input, GreedyErrorKind::Nom(kind))])
    }

    fn append(input: I, kind: ErrorKind, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Nom(kind)));
        other
    }

    fn from_char(input: I, c: char) -> Self {
        Self(vec![(input, GreedyErrorKind::Char(c))])
    }

    fn or(self, other: Self) -> Self {
        if self.0[0].0.length() < other.0[0].0.length() {
            self
        } else {
            other
        }
    }
}

impl<I> ContextError<I> for GreedyError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Context(ctx)));
        other
    }
}

impl GreedyError<&str> {
    /// Converts this error into a [`ParseError`] locating the failure within `source`
    pub fn into_parse_error(self, source: &str) -> ParseError {
        let offset = self
            .0
            .first()
            .map(|(rest, _)| source.len() - rest.len())
            .unwrap_or(0);
        let expected = self
            .0
            .iter()
            .map(|(_, kind)| match kind {
                GreedyErrorKind::Context(ctx) => ctx.to_string(),
                GreedyErrorKind::Char(c) => format!("'{}'", c),
                GreedyErrorKind::Nom(kind) => kind.description().to_lowercase(),
            })
            .collect::<Vec<_>>()
            .join(" in ");
        ParseError { offset, expected }
    }
}

/// An error produced when text cannot be read as an expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse expression at offset {offset}: expected {expected}")]
pub struct ParseError {
    /// Byte offset of the furthest position the parser reached
    pub offset: usize,
    pub expected: String,
}
