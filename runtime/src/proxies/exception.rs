use egg_ast::{CanonicalKey, Proxy, Runner, Value};
use egg_errors::RuntimeError;
use egg_span::Location;
use std::fmt;
use std::rc::Rc;

/// What a caught error looks like from inside an egg `catch` clause (§4.7
/// `Try`, §9 "RuntimeException proxy"): the triggering error's message and
/// origin, plus where it was first raised, exposed as read-only properties.
#[derive(Clone, Debug)]
pub struct RuntimeException {
    message: String,
    origin: String,
    location: String,
}

impl RuntimeException {
    pub fn new(error: &RuntimeError, location: &Location) -> Self {
        RuntimeException {
            message: error.to_string(),
            origin: "Runtime".to_string(),
            location: location.to_string(),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }
}

impl Proxy for RuntimeException {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        match name {
            "message" => Ok(Value::string(&self.message)),
            "origin" => Ok(Value::string(&self.origin)),
            "location" => Ok(Value::string(&self.location)),
            _ => Err(RuntimeError::UnknownProperty(name.to_string())),
        }
    }

    fn invoke(&self, _runner: &mut dyn Runner, _args: Vec<Value>) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotCallable(self.describe()))
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::Identity(self as *const Self as usize)
    }

    fn to_string_value(&self) -> String {
        format!("{}: {}", self.origin, self.message)
    }

    fn describe(&self) -> String {
        "exception".to_string()
    }
}

impl fmt::Display for RuntimeException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}
