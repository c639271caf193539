use crate::diagnostic::{Diagnostic, Severity};
use std::cell::RefCell;

/// A buffering emitter used by the Linker (§4.6, §7): "the linker itself
/// does not throw on recoverable mismatches — it records them and continues
/// where the surrounding production allows". Interior mutability mirrors the
/// grounding corpus's own `Handler` (the whole resolver tree holds a shared
/// `&Handler` rather than threading `&mut` everywhere).
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.severity == Severity::Error)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::Origin;
    use egg_span::Location;
    use std::rc::Rc;

    #[test]
    fn accumulates_without_stopping() {
        let handler = Handler::new();
        let loc = Location::unknown(Rc::from("a.egg"));
        handler.emit(Diagnostic::new(Origin::Linker, Severity::Error, loc.clone(), Message::new("one")));
        handler.emit(Diagnostic::new(Origin::Linker, Severity::Error, loc, Message::new("two")));
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 2);
    }
}
