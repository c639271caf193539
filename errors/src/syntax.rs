use crate::diagnostic::Origin;
use crate::into_diagnostic::StageError;
use thiserror::Error;

/// Syntax-lowering errors (§2, §4.2): raised while normalising the parse
/// tree onto the fixed AST kind set, e.g. an assignment target that isn't
/// one of the three legal shapes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("Invalid statement: only calls may appear as expression statements")]
    InvalidExpressionStatement,

    #[error("{0}")]
    Custom(String),
}

impl StageError for SyntaxError {
    fn origin(&self) -> Origin {
        Origin::Compiler
    }
}
