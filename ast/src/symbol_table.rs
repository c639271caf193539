use crate::type_::Type;
use indexmap::IndexMap;

/// Classification of a symbol table entry determining mutability (§3, §4.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavour {
    Builtin,
    Manifestation,
    Function,
    Argument,
    Exception,
    Guard,
    Variable,
}

impl Flavour {
    /// `Builtin|Manifestation|Function` are assignment-immutable; writes to
    /// them are errors (§3).
    pub fn is_mutable(self) -> bool {
        !matches!(self, Flavour::Builtin | Flavour::Manifestation | Flavour::Function)
    }
}

#[derive(Clone, Debug)]
pub struct Entry<V> {
    pub flavour: Flavour,
    pub ty: Type,
    pub value: V,
}

/// Returned by [`SymbolTable::add`] when the *innermost* frame already has
/// the name; shadowing across frames is still allowed (§4.5).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateName(pub String);

struct Frame<V> {
    entries: IndexMap<String, Entry<V>>,
}

impl<V> Default for Frame<V> {
    fn default() -> Self {
        Self { entries: IndexMap::new() }
    }
}

/// A stack of lexical scopes (§4.5): `push`/`pop` are strict, `add` inserts
/// only into the innermost frame, `find` walks outward. Generic over the
/// stored value representation so the Linker (binding names to types only)
/// and the Runner (binding names to live `Value`s) can share one
/// implementation.
pub struct SymbolTable<V> {
    frames: Vec<Frame<V>>,
}

/// Every frame but the root, set aside by [`SymbolTable::isolate`] while a
/// function call runs with only the root frame visible (§4.6, §9: a
/// function body closes over the global scope, not its caller's locals).
/// Opaque so callers can't inspect or reorder frames, only round-trip them
/// through [`SymbolTable::restore`].
pub struct Isolated<V>(Vec<Frame<V>>);

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        Self { frames: vec![Frame::default()] }
    }
}

impl<V> SymbolTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Popping the root frame is a programming error (§4.5).
    pub fn pop(&mut self) {
        if self.frames.len() == 1 {
            panic!("attempted to pop the symbol table's root frame");
        }
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn add(&mut self, name: &str, flavour: Flavour, ty: Type, value: V) -> Result<(), DuplicateName> {
        let top = self.frames.last_mut().expect("root frame always present");
        if top.entries.contains_key(name) {
            return Err(DuplicateName(name.to_string()));
        }
        top.entries.insert(name.to_string(), Entry { flavour, ty, value });
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Entry<V>> {
        self.frames.iter().rev().find_map(|frame| frame.entries.get(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Entry<V>> {
        self.frames.iter_mut().rev().find_map(|frame| frame.entries.get_mut(name))
    }

    /// Sets aside every frame but the root, leaving only the global scope
    /// visible. Pair with [`Self::restore`] around a function call.
    pub fn isolate(&mut self) -> Isolated<V> {
        Isolated(self.frames.split_off(1))
    }

    /// Undoes [`Self::isolate`], restoring the caller's local frames on top
    /// of the (possibly now-different) root frame.
    pub fn restore(&mut self, isolated: Isolated<V>) {
        self.frames.truncate(1);
        self.frames.extend(isolated.0);
    }
}

impl<V> SymbolTable<V> {
    /// Inserts a `Builtin`-flavoured entry at the root frame. Duplicate
    /// builtin definitions are a programming error, not a recoverable link
    /// failure — builtins are fixed at startup, before any source is read.
    pub fn builtin(&mut self, name: &str, ty: Type, value: V) {
        let root = self.frames.first_mut().expect("root frame always present");
        if root.entries.contains_key(name) {
            panic!("duplicate builtin definition: '{name}'");
        }
        root.entries.insert(name.to_string(), Entry { flavour: Flavour::Builtin, ty, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fails_only_against_the_innermost_frame() {
        let mut table: SymbolTable<i32> = SymbolTable::new();
        table.add("x", Flavour::Variable, Type::int(), 1).unwrap();
        table.push();
        // shadowing an outer frame's name is fine
        assert!(table.add("x", Flavour::Variable, Type::int(), 2).is_ok());
        assert_eq!(table.add("x", Flavour::Variable, Type::int(), 3), Err(DuplicateName("x".to_string())));
    }

    #[test]
    fn find_walks_outward_through_shadowing() {
        let mut table: SymbolTable<i32> = SymbolTable::new();
        table.add("x", Flavour::Variable, Type::int(), 1).unwrap();
        table.push();
        table.add("x", Flavour::Variable, Type::int(), 2).unwrap();
        assert_eq!(table.find("x").unwrap().value, 2);
        table.pop();
        assert_eq!(table.find("x").unwrap().value, 1);
    }

    #[test]
    #[should_panic]
    fn popping_the_root_frame_panics() {
        let mut table: SymbolTable<i32> = SymbolTable::new();
        table.pop();
    }

    #[test]
    fn isolate_hides_local_frames_until_restored() {
        let mut table: SymbolTable<i32> = SymbolTable::new();
        table.add("g", Flavour::Variable, Type::int(), 1).unwrap();
        table.push();
        table.add("local", Flavour::Variable, Type::int(), 2).unwrap();
        let isolated = table.isolate();
        assert!(table.find("local").is_none());
        assert_eq!(table.find("g").unwrap().value, 1);
        table.restore(isolated);
        assert_eq!(table.find("local").unwrap().value, 2);
    }

    #[test]
    fn immutable_flavours_reject_writes() {
        assert!(!Flavour::Builtin.is_mutable());
        assert!(!Flavour::Function.is_mutable());
        assert!(Flavour::Variable.is_mutable());
        assert!(Flavour::Guard.is_mutable());
    }
}
