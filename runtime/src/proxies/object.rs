use egg_ast::{CanonicalKey, LazyValue, Proxy, PullIterator, Runner, Value, ValueMap};
use egg_errors::RuntimeError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::builtin_fn::BuiltinFn;
use crate::ops;
use crate::proxies::array::assign_op_of;

/// The object-literal proxy (§4.3 `VanillaObject`): a `ValueMap` exposed
/// through both the named (`.foo`) and indexed (`["foo"]`) surfaces —
/// property access is just index access restricted to string keys, so both
/// operate on the same backing map (§3 "an object's indexed and named
/// surfaces share one backing store").
#[derive(Clone)]
pub struct VanillaObject {
    entries: Rc<RefCell<ValueMap>>,
}

impl fmt::Debug for VanillaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VanillaObject({:?})", self.entries.borrow())
    }
}

impl VanillaObject {
    pub fn new(entries: ValueMap) -> Self {
        VanillaObject { entries: Rc::new(RefCell::new(entries)) }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }
}

impl Proxy for VanillaObject {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        self.get_index(&Value::string(name))
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        self.set_index(&Value::string(name), value)
    }

    fn mut_property(&self, name: &str, op: &str, lazy: LazyValue) -> Result<Value, RuntimeError> {
        self.mut_index(&Value::string(name), op, lazy)
    }

    fn del_property(&self, name: &str) -> Result<(), RuntimeError> {
        self.del_index(&Value::string(name))
    }

    fn get_index(&self, index: &Value) -> Result<Value, RuntimeError> {
        self.entries
            .borrow()
            .get(index)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownProperty(index.to_string_value()))
    }

    fn set_index(&self, index: &Value, value: Value) -> Result<(), RuntimeError> {
        self.entries.borrow_mut().insert(index.clone(), value);
        Ok(())
    }

    fn mut_index(&self, index: &Value, op: &str, lazy: LazyValue) -> Result<Value, RuntimeError> {
        let assign_op = assign_op_of(op)?;
        let current =
            if ops::needs_current_value(assign_op) { self.get_index(index)? } else { Value::Void };
        let rhs = lazy()?;
        let updated = ops::apply_assign_op(assign_op, &current, rhs)?;
        self.set_index(index, updated.clone())?;
        Ok(updated)
    }

    fn del_index(&self, index: &Value) -> Result<(), RuntimeError> {
        self.entries
            .borrow_mut()
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| RuntimeError::UnknownProperty(index.to_string_value()))
    }

    fn get_iterator(&self) -> Result<PullIterator, RuntimeError> {
        let entries = self.entries.clone();
        let mut cursor = 0usize;
        Ok(Box::new(move || {
            let entries = entries.borrow();
            let next = entries.chronological().nth(cursor);
            match next {
                Some((_, value)) => {
                    cursor += 1;
                    Ok(value.clone())
                }
                None => Ok(Value::Void),
            }
        }))
    }

    fn invoke(&self, _runner: &mut dyn Runner, _args: Vec<Value>) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotCallable(self.describe()))
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::Identity(Rc::as_ptr(&self.entries) as usize)
    }

    fn to_string_value(&self) -> String {
        let rendered: Vec<String> = self
            .entries
            .borrow()
            .chronological()
            .map(|(k, v)| format!("{}: {}", k.to_string_value(), v.to_debug()))
            .collect();
        format!("{{{}}}", rendered.join(", "))
    }

    fn describe(&self) -> String {
        "object".to_string()
    }
}

/// `array.join(sep)` (§4.3 "concatenation is via `string(…)` manifestation
/// or `join`"): renders each element's `toStringValue` separated by `sep`
/// (default `""`).
pub fn array_join(elements: Rc<RefCell<Vec<Value>>>) -> Value {
    BuiltinFn::new("join", move |_runner, args| {
        let sep = match args.first() {
            Some(Value::String(s)) => s.iter().collect::<String>(),
            Some(other) => return Err(RuntimeError::IncompatibleType {
                expected: "string".into(),
                found: other.type_of().to_string(),
            }),
            None => String::new(),
        };
        let rendered: Vec<String> = elements.borrow().iter().map(|v| v.to_string_value()).collect();
        Ok(Value::string(&rendered.join(&sep)))
    })
    .into_value()
}
