use egg_ast::{CanonicalKey, Proxy, Runner, Value};
use egg_errors::RuntimeError;
use std::fmt;
use std::rc::Rc;

use crate::string_ops;

/// The fixed set of method names a `PropertyGet` on a `Value::String`
/// recognises (§4.3 `StringMethod`, §8). Anything else is an
/// `UnknownProperty` — strings have no other writable surface (`length` is
/// handled directly as a property, not a method).
const METHOD_NAMES: &[&str] = &["hash", "slice", "replace", "padStart", "padEnd"];

pub fn string_method_names() -> &'static [&'static str] {
    METHOD_NAMES
}

/// The ad-hoc proxy a string's `.hash`, `.slice`, … property access
/// produces: a bound method closing over its receiver, callable exactly
/// once the surrounding `Call` node invokes it (§4.3, §9 "StringMethod").
#[derive(Clone)]
pub struct StringMethod {
    receiver: Rc<Vec<char>>,
    name: String,
}

impl fmt::Debug for StringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringMethod({})", self.name)
    }
}

impl StringMethod {
    pub fn new(receiver: Rc<Vec<char>>, name: &str) -> Self {
        StringMethod { receiver, name: name.to_string() }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }
}

fn expect_int(value: &Value) -> Result<i64, RuntimeError> {
    match value {
        Value::Int(n) => num_traits::ToPrimitive::to_i64(n)
            .ok_or_else(|| RuntimeError::Custom(format!("integer argument out of range: {n}"))),
        other => Err(RuntimeError::IncompatibleType { expected: "int".into(), found: other.type_of().to_string() }),
    }
}

fn expect_string(value: &Value) -> Result<Rc<Vec<char>>, RuntimeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(RuntimeError::IncompatibleType { expected: "string".into(), found: other.type_of().to_string() }),
    }
}

impl Proxy for StringMethod {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        Err(RuntimeError::UnknownProperty(name.to_string()))
    }

    fn invoke(&self, _runner: &mut dyn Runner, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match self.name.as_str() {
            "hash" => {
                if !args.is_empty() {
                    return Err(RuntimeError::ArityMismatch { expected: 0, found: args.len() });
                }
                // FNV-1a over codepoints (§8 #2: only distinctness is asserted).
                let mut hash: u64 = 0xcbf29ce484222325;
                for ch in self.receiver.iter() {
                    for byte in (*ch as u32).to_le_bytes() {
                        hash ^= byte as u64;
                        hash = hash.wrapping_mul(0x100000001b3);
                    }
                }
                Ok(Value::Int(num_bigint::BigInt::from(hash)))
            }
            "slice" => {
                if args.is_empty() || args.len() > 2 {
                    return Err(RuntimeError::ArityMismatch { expected: 1, found: args.len() });
                }
                let start = expect_int(&args[0])?;
                let end = args.get(1).map(expect_int).transpose()?;
                Ok(Value::String(Rc::new(string_ops::slice(&self.receiver, start, end))))
            }
            "replace" => {
                if args.len() < 2 || args.len() > 3 {
                    return Err(RuntimeError::ArityMismatch { expected: 2, found: args.len() });
                }
                let needle = expect_string(&args[0])?;
                let replacement = expect_string(&args[1])?;
                let limit = args.get(2).map(expect_int).transpose()?;
                Ok(Value::String(Rc::new(string_ops::replace(&self.receiver, &needle, &replacement, limit))))
            }
            "padStart" => {
                if args.is_empty() || args.len() > 2 {
                    return Err(RuntimeError::ArityMismatch { expected: 1, found: args.len() });
                }
                let width = expect_int(&args[0])?.max(0) as usize;
                let pad = match args.get(1) {
                    Some(v) => expect_string(v)?,
                    None => Rc::new(vec![' ']),
                };
                Ok(Value::String(Rc::new(string_ops::pad_start(&self.receiver, width, &pad))))
            }
            "padEnd" => {
                if args.is_empty() || args.len() > 2 {
                    return Err(RuntimeError::ArityMismatch { expected: 1, found: args.len() });
                }
                let width = expect_int(&args[0])?.max(0) as usize;
                let pad = match args.get(1) {
                    Some(v) => expect_string(v)?,
                    None => Rc::new(vec![' ']),
                };
                Ok(Value::String(Rc::new(string_ops::pad_end(&self.receiver, width, &pad))))
            }
            other => Err(RuntimeError::NotCallable(format!("string method '{other}'"))),
        }
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::Identity(Rc::as_ptr(&self.receiver) as usize)
    }

    fn to_string_value(&self) -> String {
        format!("<string method {}>", self.name)
    }

    fn describe(&self) -> String {
        "function".to_string()
    }
}
