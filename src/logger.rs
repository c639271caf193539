use colored::Colorize;
use egg_errors::{Diagnostic, Logger, Severity};

/// The CLI's stdout/stderr sink (§2 "Diagnostics color", §4.8). `Print`
/// entries are the program's own `print(...)` output and go to stdout
/// uncolored, since the test harness matches on exact text; every other
/// severity is a diagnostic about the run itself and goes to stderr,
/// colorized by how bad it is.
pub struct ColoredLogger {
    color: bool,
    pub had_errors: bool,
}

impl ColoredLogger {
    pub fn new(color: bool) -> Self {
        ColoredLogger { color, had_errors: false }
    }
}

impl Logger for ColoredLogger {
    fn log(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Print {
            println!("{}", diagnostic.message);
            return;
        }
        if diagnostic.severity == Severity::Error {
            self.had_errors = true;
        }
        let rendered = diagnostic.render_tagged();
        if !self.color {
            eprintln!("{rendered}");
            return;
        }
        match diagnostic.severity {
            Severity::Error => eprintln!("{}", rendered.red()),
            Severity::Warning => eprintln!("{}", rendered.yellow()),
            Severity::Info => eprintln!("{}", rendered.cyan()),
            Severity::Debug => eprintln!("{}", rendered.blue()),
            Severity::Trace => eprintln!("{}", rendered.dimmed()),
            Severity::Print => unreachable!("handled above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg_errors::Message;
    use egg_span::Location;
    use std::rc::Rc;

    #[test]
    fn marks_had_errors_only_on_error_severity() {
        let mut logger = ColoredLogger::new(false);
        logger.log(Diagnostic::new(
            egg_errors::Origin::Runtime,
            Severity::Warning,
            Location::unknown(Rc::from("a.egg")),
            Message::new("careful"),
        ));
        assert!(!logger.had_errors);
        logger.log(Diagnostic::new(
            egg_errors::Origin::Runtime,
            Severity::Error,
            Location::unknown(Rc::from("a.egg")),
            Message::new("boom"),
        ));
        assert!(logger.had_errors);
    }
}
