//! Diagnostics, the `Logger` trait, and one error enum per pipeline stage.

mod diagnostic;
mod handler;
mod into_diagnostic;
mod linker;
mod logger;
mod message;
mod parser;
mod runtime;
mod syntax;
mod tokenizer;

pub use diagnostic::{Diagnostic, Origin, Severity};
pub use handler::Handler;
pub use into_diagnostic::StageError;
pub use linker::LinkerError;
pub use logger::{Logger, NullLogger, VecLogger};
pub use message::Message;
pub use parser::ParserError;
pub use runtime::{AssertionError, RuntimeError};
pub use syntax::SyntaxError;
pub use tokenizer::TokenizerError;

pub type Result<T, E> = std::result::Result<T, E>;
