use egg_ast::{CanonicalKey, Proxy, Runner, Value, ValueMap};
use egg_errors::RuntimeError;
use std::fmt;
use std::rc::Rc;

use super::builtin_fn::BuiltinFn;
use super::object::VanillaObject;

/// The static namespace proxy bound to `string`, `object`, and `type` in
/// the global scope (§4.3 `Manifestation`, §9): property access on one
/// yields a further manifestation or builtin (`type.of`); some
/// manifestations are themselves invokable (`string(args…)` concatenates).
#[derive(Clone, Debug)]
pub struct Manifestation {
    name: &'static str,
}

impl Manifestation {
    pub fn new(name: &'static str) -> Self {
        Manifestation { name }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }
}

impl Proxy for Manifestation {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        match (self.name, name) {
            ("type", "of") => Ok(BuiltinFn::new("type.of", |_runner, args| {
                let value = args
                    .first()
                    .ok_or(RuntimeError::ArityMismatch { expected: 1, found: 0 })?;
                Ok(Value::string(&value.type_of().to_string()))
            })
            .into_value()),
            _ => Err(RuntimeError::UnknownProperty(name.to_string())),
        }
    }

    fn invoke(&self, _runner: &mut dyn Runner, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match self.name {
            "string" => {
                let mut out = String::new();
                for arg in &args {
                    out.push_str(&arg.to_string_value());
                }
                Ok(Value::string(&out))
            }
            "object" => {
                if !args.is_empty() {
                    return Err(RuntimeError::ArityMismatch { expected: 0, found: args.len() });
                }
                Ok(VanillaObject::new(ValueMap::new()).into_value())
            }
            other => Err(RuntimeError::NotCallable(format!("manifestation '{other}'"))),
        }
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::String(Rc::new(self.name.chars().collect()))
    }

    fn to_string_value(&self) -> String {
        format!("<manifestation {}>", self.name)
    }

    fn describe(&self) -> String {
        "manifestation".to_string()
    }
}

impl fmt::Display for Manifestation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}
