use egg_ast::{CanonicalKey, ClosureId, Proxy, Runner, Value};
use egg_errors::RuntimeError;
use std::fmt;
use std::rc::Rc;

/// A `FuncDecl`'s runtime value (§4.3 `VanillaFunction`, §4.7 `FuncDecl`):
/// a handle onto the `ClosureId` the Linker minted for it. `invoke` hands
/// off to the live `Runner`, which owns the actual `FunctionDef` storage —
/// this proxy stays opaque to everything but the closure id and a name for
/// diagnostics.
#[derive(Clone, Debug)]
pub struct VanillaFunction {
    name: String,
    closure: ClosureId,
}

impl VanillaFunction {
    pub fn new(name: impl Into<String>, closure: ClosureId) -> Self {
        VanillaFunction { name: name.into(), closure }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }
}

impl Proxy for VanillaFunction {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        if name == "name" {
            return Ok(Value::string(&self.name));
        }
        Err(RuntimeError::UnknownProperty(name.to_string()))
    }

    fn invoke(&self, runner: &mut dyn Runner, args: Vec<Value>) -> Result<Value, RuntimeError> {
        runner.call_closure(self.closure, args)
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::Identity(self.closure.0)
    }

    fn to_string_value(&self) -> String {
        format!("<function {}>", self.name)
    }

    fn describe(&self) -> String {
        "function".to_string()
    }
}

impl fmt::Display for VanillaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}
