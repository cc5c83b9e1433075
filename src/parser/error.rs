use crate::parser::ast::DeclKind;
use thiserror::Error;

/// Parse errors, each carrying the byte offset in the source unit where the
/// failure was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected keyword '{keyword}' at offset {offset}")]
    ExpectedKeyword { keyword: &'static str, offset: usize },

    #[error("expected '{expected}' at offset {offset}")]
    ExpectedChar { expected: char, offset: usize },

    #[error("{kind} declaration at offset {offset} has no closing brace")]
    UnterminatedBody { kind: DeclKind, offset: usize },

    #[error("{kind} declaration at offset {offset} has no name")]
    MissingName { kind: DeclKind, offset: usize },

    #[error("field at offset {offset} is missing its type or name")]
    IncompleteField { offset: usize },

    #[error("too many members in {kind} declaration at offset {offset} (limit {limit})")]
    TooManyMembers {
        kind: DeclKind,
        offset: usize,
        limit: usize,
    },

    #[error("too many reflected types (limit {limit})")]
    TooManyTypes { limit: usize },

    #[error("invalid enumerator value '{text}' at offset {offset}")]
    InvalidEnumValue { text: String, offset: usize },
}

impl ParseError {
    /// The byte offset the error was reported at, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::ExpectedKeyword { offset, .. }
            | ParseError::ExpectedChar { offset, .. }
            | ParseError::UnterminatedBody { offset, .. }
            | ParseError::MissingName { offset, .. }
            | ParseError::IncompleteField { offset }
            | ParseError::TooManyMembers { offset, .. }
            | ParseError::InvalidEnumValue { offset, .. } => Some(*offset),
            ParseError::TooManyTypes { .. } => None,
        }
    }
}
