use crate::location::SourceName;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The original, unsubstituted path or synthetic name a source was loaded
/// under. The test harness substitutes `<RESOURCE>` for this in expected
/// output so fixtures stay portable across machines.
pub const RESOURCE_PLACEHOLDER: &str = "<RESOURCE>";

/// Registry of loaded sources, keyed by name.
///
/// Kept deliberately simple: the tokenizer tracks line/column directly as it
/// scans, so the map exists only so later stages (the loader, the test
/// harness, `describe()` style diagnostics) can look a source's text back up
/// by the name recorded in every [`crate::Location`].
#[derive(Default)]
pub struct SourceMap {
    sources: RefCell<HashMap<SourceName, Rc<str>>>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` under `name`, returning the interned name to embed
    /// into `Location`s produced while tokenizing it.
    pub fn add(&self, name: &str, text: &str) -> SourceName {
        let name: SourceName = Rc::from(name);
        self.sources.borrow_mut().insert(name.clone(), Rc::from(text));
        name
    }

    pub fn text_of(&self, name: &SourceName) -> Option<Rc<str>> {
        self.sources.borrow().get(name).cloned()
    }

    /// Substitutes [`RESOURCE_PLACEHOLDER`] for every occurrence of `name`
    /// in `text` — used by the test harness when comparing logged
    /// diagnostics that embed the source path against fixture text that
    /// can't know that path ahead of time.
    pub fn normalize(&self, name: &SourceName, text: &str) -> String {
        text.replace(name.as_ref(), RESOURCE_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_text_by_name() {
        let map = SourceMap::new();
        let name = map.add("a.egg", "print(1);");
        assert_eq!(map.text_of(&name).as_deref(), Some("print(1);"));
    }

    #[test]
    fn normalize_substitutes_every_occurrence_of_the_source_name() {
        let map = SourceMap::new();
        let name = map.add("fixture.egg", "");
        let text = "fixture.egg(1,1): error near fixture.egg(2,1)";
        assert_eq!(map.normalize(&name, text), "<RESOURCE>(1,1): error near <RESOURCE>(2,1)");
    }
}
