use crate::diagnostic::Origin;
use crate::into_diagnostic::StageError;
use thiserror::Error;

/// Lexical errors (§4.1). Fatal to the tokenizer call that raised them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("Invalid character in number literal: '{0}'")]
    InvalidNumberChar(char),

    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Invalid escape sequence: '\\{0}'")]
    InvalidEscape(char),

    #[error("Empty unicode escape")]
    EmptyUnicodeEscape,

    #[error("Malformed unicode escape sequence")]
    MalformedUnicodeEscape,

    #[error("Too many hex digits in unicode escape")]
    TooManyHexDigits,

    #[error("Codepoint out of range: {0:#x}")]
    CodepointOutOfRange(u32),

    #[error("Unterminated block comment")]
    UnterminatedBlockComment,

    #[error("Unexpected character: '{0}'")]
    UnexpectedChar(char),
}

impl StageError for TokenizerError {
    fn origin(&self) -> Origin {
        Origin::Tokenizer
    }
}
