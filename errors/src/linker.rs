use crate::diagnostic::Origin;
use crate::into_diagnostic::StageError;
use thiserror::Error;

/// Resolution errors (§4.6). Collected on the `Handler` as they're found;
/// a compilation with any of these fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinkerError {
    #[error("Undefined identifier: '{0}'")]
    UndefinedIdentifier(String),

    #[error("'{0}' is already defined in this scope")]
    DuplicateDefinition(String),

    #[error("Cannot assign to '{0}': not mutable")]
    AssignmentToImmutable(String),

    #[error("Type '{found}' is not compatible with '{expected}'")]
    IncompatibleType { expected: String, found: String },

    #[error("Duplicate builtin definition: '{0}'")]
    DuplicateBuiltin(String),

    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("'{0}' is not a valid catch/guard type")]
    InvalidGuardType(String),

    #[error("Void cannot be used as an array or object element")]
    VoidElement,

    #[error("{0}")]
    Custom(String),
}

impl StageError for LinkerError {
    fn origin(&self) -> Origin {
        Origin::Linker
    }
}
