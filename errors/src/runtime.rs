use crate::diagnostic::Origin;
use crate::into_diagnostic::StageError;
use thiserror::Error;

/// Runtime errors (§4.7, §7) — the only origin catchable by a program's
/// `try`/`catch`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown property: '{0}'")]
    UnknownProperty(String),

    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Value of type '{0}' is not callable")]
    NotCallable(String),

    #[error("Cannot modify property '{0}' on a string")]
    StringPropertyImmutable(String),

    #[error("Cannot modify index on a string")]
    StringIndexImmutable,

    #[error("'{0}' is assignment-immutable")]
    AssignmentImmutable(String),

    #[error("Unsupported operation '{op}' on {lhs} and {rhs}")]
    UnsupportedBinaryOperation { op: String, lhs: String, rhs: String },

    #[error("Unsupported operation '{op}' on {operand}")]
    UnsupportedUnaryOperation { op: String, operand: String },

    #[error("Wrong number of arguments: expected {expected}, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Value of type '{found}' is not compatible with '{expected}'")]
    IncompatibleType { expected: String, found: String },

    #[error("Void cannot be used as an array or object element")]
    VoidElement,

    #[error("{0}")]
    Custom(String),

    /// An assertion failure, carried through the `Runner`/`Proxy` boundary
    /// (§4.3 `invoke`/`call_closure` only ever return `RuntimeError`).
    /// [`StageError::origin`] reports `Assertion` so an *uncaught* failure
    /// still renders with its own diagnostic tag, but §8 scenario 7 shows
    /// one caught by an enclosing `try`/`catch` same as any other runtime
    /// error, so `TreeWalker` dispatches it to catch clauses uniformly.
    #[error("{0}")]
    Assertion(String),
}

impl StageError for RuntimeError {
    fn origin(&self) -> Origin {
        match self {
            RuntimeError::Assertion(_) => Origin::Assertion,
            _ => Origin::Runtime,
        }
    }
}

/// Assertion failures are their own diagnostic origin (§7) for uncaught
/// rendering, but remain catchable by an enclosing `try`/`catch` (§8
/// scenario 7) like any other runtime error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AssertionError {
    #[error("Assertion is untrue: {lhs} {op} {rhs}")]
    Comparison { lhs: String, op: String, rhs: String },

    #[error("Assertion is untrue: {0}")]
    Plain(String),
}

impl StageError for AssertionError {
    fn origin(&self) -> Origin {
        Origin::Assertion
    }
}
