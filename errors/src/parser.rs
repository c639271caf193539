use crate::diagnostic::Origin;
use crate::into_diagnostic::StageError;
use thiserror::Error;

/// Parse errors (§4.2). Fatal to the parse call that raised them — "no
/// recovery/continuation".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Expected {expected}, but got {found} instead")]
    Unexpected { expected: String, found: String },

    #[error("Expected {expected}, but got end-of-file instead")]
    UnexpectedEof { expected: String },

    #[error("{0}")]
    Custom(String),
}

impl ParserError {
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Unexpected { expected: expected.into(), found: found.into() }
    }

    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof { expected: expected.into() }
    }
}

impl StageError for ParserError {
    fn origin(&self) -> Origin {
        Origin::Parser
    }
}
