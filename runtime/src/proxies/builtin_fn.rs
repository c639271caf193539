use egg_ast::{CanonicalKey, Proxy, Runner, Value};
use egg_errors::RuntimeError;
use std::fmt;
use std::rc::Rc;

/// The generic closure-backed proxy every built-in callable that isn't a
/// `VanillaFunction` is made of: `print`, `array.join`, `type.of`, `string(…)`
/// concatenation (§4.3, §9 "avoid open-world inheritance" — one concrete
/// kind, not a trait object per builtin). Arity/type mistakes are the
/// closure's own responsibility to report.
#[derive(Clone)]
pub struct BuiltinFn {
    name: String,
    func: Rc<dyn Fn(&mut dyn Runner, Vec<Value>) -> Result<Value, RuntimeError>>,
}

impl BuiltinFn {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&mut dyn Runner, Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        BuiltinFn { name: name.into(), func: Rc::new(func) }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

impl Proxy for BuiltinFn {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        Err(RuntimeError::UnknownProperty(name.to_string()))
    }

    fn invoke(&self, runner: &mut dyn Runner, args: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.func)(runner, args)
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::Identity(Rc::as_ptr(&self.func) as *const () as usize)
    }

    fn to_string_value(&self) -> String {
        format!("<builtin {}>", self.name)
    }

    fn describe(&self) -> String {
        "function".to_string()
    }
}
