use crate::diagnostic::{Diagnostic, Origin, Severity};
use crate::message::Message;
use egg_span::Location;
use std::fmt;

/// Implemented by each stage's error enum so it can be turned into a
/// `Diagnostic` once the caller knows *where* it happened. Keeping location
/// out of the error enums themselves lets `?` compose cleanly through
/// recursive-descent code that doesn't always have a `Location` handy at the
/// point an error value is constructed.
pub trait StageError: fmt::Display {
    fn origin(&self) -> Origin;

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn at(self, location: Location) -> Diagnostic
    where
        Self: Sized,
    {
        Diagnostic::new(self.origin(), self.severity(), location, Message::new(self.to_string()))
    }
}
