use crate::proxy::{CanonicalKey, Proxy};
use crate::type_::{PrimitiveTag, Type};
use egg_errors::RuntimeError;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::fmt;
use std::rc::Rc;

pub fn bigint_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(f64::NAN)
}

/// A tagged value (§3): exactly one of `Void, Null, Bool, Int, Float,
/// String, Proxy`. `Int` is arbitrary-precision; `String` is a Unicode
/// codepoint sequence, not UTF-16.
#[derive(Clone, Debug)]
pub enum Value {
    Void,
    Null,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    String(Rc<Vec<char>>),
    Proxy(Rc<dyn Proxy>),
}

impl Value {
    pub fn string(s: &str) -> Value {
        Value::String(Rc::new(s.chars().collect()))
    }

    pub fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    pub fn kind_tag(&self) -> PrimitiveTag {
        match self {
            Value::Void => PrimitiveTag::Void,
            Value::Null => PrimitiveTag::Null,
            Value::Bool(_) => PrimitiveTag::Bool,
            Value::Int(_) => PrimitiveTag::Int,
            Value::Float(_) => PrimitiveTag::Float,
            Value::String(_) => PrimitiveTag::String,
            Value::Proxy(_) => PrimitiveTag::Object,
        }
    }

    /// The runtime type of this value as a canonical, single-tag `Type`.
    pub fn type_of(&self) -> Type {
        Type::new([self.kind_tag()])
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(bigint_to_f64(n)),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Identity equality (§3): requires equal Kind, unlike `equals`, which
    /// numerically promotes across Int/Float.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Proxy(a), Value::Proxy(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Semantic equality (§3, §9): Int/Float compare by numeric value
    /// rather than by Kind.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Value::Proxy(a), Value::Proxy(b)) => a.to_underlying() == b.to_underlying(),
            _ => self.same(other),
        }
    }

    pub fn compare(&self, other: &Value) -> Option<std::cmp::Ordering> {
        let (a, b) = (self.as_number()?, other.as_number()?);
        a.partial_cmp(&b)
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        match self {
            Value::Void => CanonicalKey::Void,
            Value::Null => CanonicalKey::Null,
            Value::Bool(b) => CanonicalKey::Bool(*b),
            Value::Int(n) => CanonicalKey::Int(n.clone()),
            Value::Float(f) => CanonicalKey::Float(f.to_bits()),
            Value::String(s) => CanonicalKey::String(s.clone()),
            Value::Proxy(p) => p.to_underlying(),
        }
    }

    fn numeric_binary(
        &self,
        other: &Value,
        op: &str,
        int_op: impl FnOnce(&BigInt, &BigInt) -> Result<BigInt, RuntimeError>,
        float_op: impl FnOnce(f64, f64) -> f64,
    ) -> Result<Value, RuntimeError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(a, b)?)),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                let a = self.as_number().unwrap();
                let b = other.as_number().unwrap();
                Ok(Value::Float(float_op(a, b)))
            }
            _ => Err(RuntimeError::UnsupportedBinaryOperation {
                op: op.to_string(),
                lhs: self.type_of().to_string(),
                rhs: other.type_of().to_string(),
            }),
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_binary(other, "+", |a, b| Ok(a + b), |a, b| a + b)
    }

    pub fn sub(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_binary(other, "-", |a, b| Ok(a - b), |a, b| a - b)
    }

    pub fn mul(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_binary(other, "*", |a, b| Ok(a * b), |a, b| a * b)
    }

    pub fn div(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_binary(
            other,
            "/",
            |a, b| if b.is_zero() { Err(RuntimeError::DivisionByZero) } else { Ok(a / b) },
            |a, b| a / b,
        )
    }

    pub fn rem(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_binary(
            other,
            "%",
            |a, b| if b.is_zero() { Err(RuntimeError::DivisionByZero) } else { Ok(a % b) },
            |a, b| a % b,
        )
    }

    pub fn neg(&self) -> Result<Value, RuntimeError> {
        match self {
            Value::Int(n) => Ok(Value::Int(-n)),
            Value::Float(f) => Ok(Value::Float(-f)),
            other => Err(RuntimeError::UnsupportedUnaryOperation { op: "-".to_string(), operand: other.type_of().to_string() }),
        }
    }

    pub fn not(&self) -> Result<Value, RuntimeError> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(RuntimeError::UnsupportedUnaryOperation { op: "!".to_string(), operand: other.type_of().to_string() }),
        }
    }

    /// Postfix `++`/`--` (§4.3): Int-only, returns the *old* value.
    pub fn nudge(&self, increment: bool) -> Result<(Value, Value), RuntimeError> {
        match self {
            Value::Int(n) => {
                let next = if increment { n + 1 } else { n - 1 };
                Ok((self.clone(), Value::Int(next)))
            }
            other => Err(RuntimeError::UnsupportedUnaryOperation {
                op: if increment { "++".to_string() } else { "--".to_string() },
                operand: other.type_of().to_string(),
            }),
        }
    }

    pub fn to_string_value(&self) -> String {
        match self {
            Value::Void => "void".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.iter().collect(),
            Value::Proxy(p) => p.to_string_value(),
        }
    }

    pub fn to_debug(&self) -> String {
        match self {
            Value::String(s) => format!("{:?}", s.iter().collect::<String>()),
            Value::Proxy(p) => p.to_debug(),
            other => other.to_string_value(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

/// `Float.format` (§8): strips trailing zeroes, preserves `.0` for integral
/// floats, switches to exponent form outside the "normal" magnitude range.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let mut s = format!("{f:e}");
        if let Some(pos) = s.find('e') {
            if !s[pos + 1..].starts_with('-') {
                s.insert(pos + 1, '+');
            }
        }
        return s;
    }
    let s = format!("{f}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_promotes_int_and_float() {
        assert!(Value::int(3).equals(&Value::Float(3.0)));
    }

    #[test]
    fn same_requires_equal_kind() {
        assert!(!Value::int(3).same(&Value::Float(3.0)));
    }

    #[test]
    fn nudge_returns_old_value_and_mutates() {
        let (old, new) = Value::int(4).nudge(true).unwrap();
        assert_eq!(old, Value::int(4));
        assert_eq!(new, Value::int(5));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(Value::int(1).div(&Value::int(0)).unwrap_err(), RuntimeError::DivisionByZero);
    }

    #[test]
    fn float_format_preserves_dot_zero() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(3.25), "3.25");
    }

    #[test]
    fn float_format_uses_exponent_for_extreme_magnitudes() {
        assert!(format_float(1e30).contains('e'));
    }
}
