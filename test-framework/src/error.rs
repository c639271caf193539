use thiserror::Error;

/// Why a script failed to match its own `///>`/`///<` directives, or failed
/// to make it through the pipeline at all. Not a `StageError` itself — this
/// is the harness's own verdict, not a language diagnostic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TestFailure {
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("parser error: {0}")]
    Parser(String),

    #[error("syntax-lowering error: {0}")]
    Lowering(String),

    #[error("linker reported errors:\n{0}")]
    Linker(String),

    #[error("directive {index} expected a Print entry reading {expected:?}, but got {found:?}")]
    PrintMismatch { index: usize, expected: String, found: String },

    #[error("directive {index} expected a non-Print entry reading {expected:?}, but got {found:?}")]
    NonPrintMismatch { index: usize, expected: String, found: String },

    #[error("directive {index} expected a Print entry, but the next logged entry was not one: {found:?}")]
    ExpectedPrint { index: usize, found: String },

    #[error("directive {index} expected a non-Print entry, but the next logged entry was a Print: {found:?}")]
    ExpectedNonPrint { index: usize, found: String },

    #[error("directive {index} expected {expected:?}, but the log ended")]
    LogEndedEarly { index: usize, expected: String },

    #[error("unexpected extra log entry after every directive matched: {0:?}")]
    ExtraLogEntry(String),
}

pub type TestResult<T> = Result<T, TestFailure>;
