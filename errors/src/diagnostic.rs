use crate::message::Message;
use egg_span::Location;
use std::fmt;

/// Which stage raised a diagnostic. Only [`Origin::Runtime`] is catchable by
/// an egg program's `try`/`catch`; the rest are fatal to their stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    Tokenizer,
    Parser,
    Compiler,
    Linker,
    Assertion,
    Runtime,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Origin::Tokenizer => "Tokenizer",
            Origin::Parser => "Parser",
            Origin::Compiler => "Compiler",
            Origin::Linker => "Linker",
            Origin::Assertion => "Assertion",
            Origin::Runtime => "Runtime",
        };
        write!(f, "{s}")
    }
}

/// Logger severities, in the order the interpreter may emit them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Print,
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Print => "Print",
            Severity::Trace => "Trace",
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        write!(f, "{s}")
    }
}

/// A single structured message with a source location, ready to be logged.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub origin: Origin,
    pub severity: Severity,
    pub location: Location,
    pub message: Message,
}

impl Diagnostic {
    pub fn new(origin: Origin, severity: Severity, location: Location, message: Message) -> Self {
        Self { origin, severity, location, message }
    }

    /// `source(line,col): message` — the bare form used for fatal
    /// tokenizer/parser errors (§6).
    pub fn render_plain(&self) -> String {
        format!("{}: {}", self.location, self.message)
    }

    /// `<ORIGIN><SEVERITY>source(line,col): message` — the tagged form used
    /// by the Logger (§7).
    pub fn render_tagged(&self) -> String {
        format!("<{}><{}>{}: {}", self.origin, self.severity, self.location, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_tagged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn plain_render_has_no_tags() {
        let loc = Location::point(Rc::from("a.egg"), 1, 7);
        let d = Diagnostic::new(Origin::Parser, Severity::Error, loc, Message::new("Empty input"));
        assert_eq!(d.render_plain(), "a.egg(1,7): Empty input");
    }

    #[test]
    fn tagged_render_has_origin_and_severity() {
        let loc = Location::point(Rc::from("a.egg"), 1, 7);
        let d = Diagnostic::new(Origin::Runtime, Severity::Error, loc, Message::new("boom"));
        assert_eq!(d.render_tagged(), "<Runtime><Error>a.egg(1,7): boom");
    }
}
