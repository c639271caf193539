use crate::value::Value;
use egg_errors::RuntimeError;
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::fmt;
use std::rc::Rc;

/// Opaque handle to a user-defined function body, minted and interpreted
/// only by the runtime crate's concrete `Runner`. Kept opaque here so the
/// Proxy protocol — and `VanillaFunction`, which needs to call back into the
/// tree-walker — can be expressed without `egg-ast` depending on `egg-runtime`
/// (which depends on `egg-ast` for `Value`/`Type`/`Proxy` itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClosureId(pub usize);

/// The capability a concrete Runner exposes back to a Proxy so that
/// `invoke` can call a user-defined function without this crate knowing
/// what a runtime node or a call stack frame is (§4.3 `invoke`, §9 "avoid
/// open-world inheritance"). `log_print` is the hook the `print` builtin
/// uses to reach the Logger (§4.8) without the Proxy trait depending on a
/// concrete logger type.
pub trait Runner {
    fn call_closure(&mut self, id: ClosureId, args: Vec<Value>) -> Result<Value, RuntimeError>;
    fn log_print(&mut self, text: String);
}

/// A pull-style iterator: call repeatedly, `Value::Void` signals the end
/// (§4.3 `getIterator`, §9 "pull closure").
pub type PullIterator = Box<dyn FnMut() -> Result<Value, RuntimeError>>;

/// Lazily-produced compound-assignment right-hand side (§4.3 `mutProperty`
/// `lazy`, §9 "Lazy RHS"): evaluated only if the operator needs it.
pub type LazyValue<'a> = &'a mut dyn FnMut() -> Result<Value, RuntimeError>;

/// The uniform capability set every object-like value implements (§4.3).
/// Concrete implementers — `VanillaArray`, `VanillaObject`, `VanillaFunction`,
/// `StringMethod`, `Manifestation`, the runtime exception proxy — live in
/// `egg-runtime`, the one crate that can give `invoke` a live `Runner`.
pub trait Proxy: fmt::Debug {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError>;

    /// Default: most proxies (string methods, manifestations, exceptions)
    /// expose no writable properties.
    fn set_property(&self, name: &str, _value: Value) -> Result<(), RuntimeError> {
        Err(RuntimeError::Custom(format!("cannot set property '{name}' on {}", self.describe())))
    }

    fn mut_property(&self, name: &str, _op: &str, _lazy: LazyValue) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Custom(format!("cannot modify property '{name}' on {}", self.describe())))
    }

    fn del_property(&self, name: &str) -> Result<(), RuntimeError> {
        Err(RuntimeError::Custom(format!("cannot delete property '{name}' on {}", self.describe())))
    }

    fn get_index(&self, _index: &Value) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Custom(format!("{} is not indexable", self.describe())))
    }

    fn set_index(&self, _index: &Value, _value: Value) -> Result<(), RuntimeError> {
        Err(RuntimeError::Custom(format!("{} is not indexable", self.describe())))
    }

    fn mut_index(&self, _index: &Value, _op: &str, _lazy: LazyValue) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Custom(format!("{} is not indexable", self.describe())))
    }

    fn del_index(&self, _index: &Value) -> Result<(), RuntimeError> {
        Err(RuntimeError::Custom(format!("{} is not indexable", self.describe())))
    }

    fn get_iterator(&self) -> Result<PullIterator, RuntimeError> {
        Err(RuntimeError::Custom(format!("{} is not iterable", self.describe())))
    }

    fn invoke(&self, _runner: &mut dyn Runner, _args: Vec<Value>) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotCallable(self.describe()))
    }

    /// The raw payload, used for identity equality and as a `ValueMap` key.
    fn to_underlying(&self) -> CanonicalKey;

    fn to_string_value(&self) -> String;

    fn to_debug(&self) -> String {
        self.to_string_value()
    }

    fn describe(&self) -> String {
        "object".to_string()
    }
}

/// The canonical key a `Value` maps to inside a [`ValueMap`] (§4.3): `Bool`
/// a native bool, `Int` its bigint, `Float` its bits (for `Eq`/`Hash`),
/// `String` its codepoint payload, `Proxy` its `toUnderlying()` identity;
/// `Void`/`Null` are distinct singletons.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalKey {
    Void,
    Null,
    Bool(bool),
    Int(BigInt),
    Float(u64),
    String(Rc<Vec<char>>),
    Identity(usize),
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalKey::Void => write!(f, "void"),
            CanonicalKey::Null => write!(f, "null"),
            CanonicalKey::Bool(b) => write!(f, "{b}"),
            CanonicalKey::Int(n) => write!(f, "{n}"),
            CanonicalKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            CanonicalKey::String(s) => write!(f, "{}", s.iter().collect::<String>()),
            CanonicalKey::Identity(addr) => write!(f, "<object@{addr:#x}>"),
        }
    }
}

/// A mapping from `Value` to `Value` keyed by canonical identity (§4.3),
/// preserving insertion order. Backs `VanillaObject`.
#[derive(Clone, Debug, Default)]
pub struct ValueMap {
    entries: IndexMap<CanonicalKey, (Value, Value)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(&key.canonical_key()).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.entries.insert(key.canonical_key(), (key, value)).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries.shift_remove(&key.canonical_key()).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn chronological(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    /// Entries ordered by a caller-supplied comparator over keys; falls
    /// back to insertion order ties are broken by original position.
    pub fn ordered(&self, mut cmp: impl FnMut(&Value, &Value) -> std::cmp::Ordering) -> Vec<(Value, Value)> {
        let mut entries: Vec<(Value, Value)> = self.entries.values().cloned().collect();
        entries.sort_by(|(k1, _), (k2, _)| cmp(k1, k2));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut map = ValueMap::new();
        map.insert(Value::String(Rc::new("b".chars().collect())), Value::Int(BigInt::from(2)));
        map.insert(Value::String(Rc::new("a".chars().collect())), Value::Int(BigInt::from(1)));
        let keys: Vec<String> = map.chronological().map(|(k, _)| k.to_string_value()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn overwriting_a_key_keeps_its_original_position() {
        let mut map = ValueMap::new();
        map.insert(Value::String(Rc::new("a".chars().collect())), Value::Int(BigInt::from(1)));
        map.insert(Value::String(Rc::new("b".chars().collect())), Value::Int(BigInt::from(2)));
        map.insert(Value::String(Rc::new("a".chars().collect())), Value::Int(BigInt::from(3)));
        let keys: Vec<String> = map.chronological().map(|(k, _)| k.to_string_value()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
