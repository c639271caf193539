use crate::ast::BinaryOp;
use crate::value::Value;
use std::collections::BTreeSet;
use std::fmt;

/// One of the primitive tags a [`Type`] can carry (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveTag {
    Void,
    Null,
    Bool,
    Int,
    Float,
    String,
    Object,
}

impl fmt::Display for PrimitiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PrimitiveTag::*;
        let s = match self {
            Void => "void",
            Null => "null",
            Bool => "bool",
            Int => "int",
            Float => "float",
            String => "string",
            Object => "object",
        };
        write!(f, "{s}")
    }
}

/// A non-primitive descriptor attached to a [`Type`] (§4.4, GLOSSARY
/// "Shape"): a callable signature or an iterable's element type.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Callable { params: Vec<Type>, returns: Box<Type> },
    Iterable { element: Box<Type> },
}

/// An unordered set of primitive tags plus an optional shape (§3, §4.4).
/// The empty set is only ever produced as the sentinel result of a failed
/// [`Type::compatible_type`].
#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    pub tags: BTreeSet<PrimitiveTag>,
    pub shape: Option<Shape>,
}

impl Type {
    pub fn new(tags: impl IntoIterator<Item = PrimitiveTag>) -> Self {
        Self { tags: tags.into_iter().collect(), shape: None }
    }

    pub fn empty() -> Self {
        Self { tags: BTreeSet::new(), shape: None }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.shape.is_none()
    }

    pub fn void() -> Self {
        Type::new([PrimitiveTag::Void])
    }
    pub fn null() -> Self {
        Type::new([PrimitiveTag::Null])
    }
    pub fn bool() -> Self {
        Type::new([PrimitiveTag::Bool])
    }
    pub fn int() -> Self {
        Type::new([PrimitiveTag::Int])
    }
    pub fn float() -> Self {
        Type::new([PrimitiveTag::Float])
    }
    pub fn string() -> Self {
        Type::new([PrimitiveTag::String])
    }
    pub fn object() -> Self {
        Type::new([PrimitiveTag::Object])
    }

    /// `Bool|Int|Float|String|Object`.
    pub fn any() -> Self {
        use PrimitiveTag::*;
        Type::new([Bool, Int, Float, String, Object])
    }

    /// `ANY|Null`.
    pub fn anyq() -> Self {
        let mut t = Type::any();
        t.tags.insert(PrimitiveTag::Null);
        t
    }

    pub fn contains(&self, tag: PrimitiveTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn nullable(&self) -> Self {
        let mut t = self.clone();
        t.tags.insert(PrimitiveTag::Null);
        t
    }

    /// Drops `Null` from the tag set — used when lowering the `var` (as
    /// opposed to `var?`) inferred-type rule (§4.6).
    pub fn without_null(&self) -> Self {
        let mut t = self.clone();
        t.tags.remove(&PrimitiveTag::Null);
        t
    }

    /// Adjusts `value` for promotion (`Int` → `Float` when this type admits
    /// `Float` but not `Int`), or `Value::Void` if incompatible (§4.4).
    pub fn compatible_value(&self, value: &Value) -> Value {
        match value {
            Value::Void if self.contains(PrimitiveTag::Void) => value.clone(),
            Value::Null if self.contains(PrimitiveTag::Null) => value.clone(),
            Value::Bool(_) if self.contains(PrimitiveTag::Bool) => value.clone(),
            Value::Int(n) => {
                if self.contains(PrimitiveTag::Int) {
                    value.clone()
                } else if self.contains(PrimitiveTag::Float) {
                    Value::Float(crate::value::bigint_to_f64(n))
                } else {
                    Value::Void
                }
            }
            Value::Float(_) if self.contains(PrimitiveTag::Float) => value.clone(),
            Value::String(_) if self.contains(PrimitiveTag::String) => value.clone(),
            Value::Proxy(_) if self.contains(PrimitiveTag::Object) => value.clone(),
            _ => Value::Void,
        }
    }

    /// Unions two types' tag sets, used where the Linker needs a type that
    /// admits *either* side rather than their intersection (§4.6) — e.g. an
    /// array literal's inferred element type, or a ternary's two arms.
    pub fn union(&self, other: &Type) -> Type {
        Type { tags: self.tags.union(&other.tags).copied().collect(), shape: None }
    }

    /// Intersects two types, widening `Int`↔`Float` element-wise (§4.4). An
    /// empty result is a link-time incompatibility.
    pub fn compatible_type(&self, other: &Type) -> Type {
        let mut tags = BTreeSet::new();
        for tag in &self.tags {
            if other.tags.contains(tag) {
                tags.insert(*tag);
            } else if *tag == PrimitiveTag::Int && other.tags.contains(&PrimitiveTag::Float) {
                tags.insert(PrimitiveTag::Float);
            } else if *tag == PrimitiveTag::Float && other.tags.contains(&PrimitiveTag::Int) {
                tags.insert(PrimitiveTag::Float);
            }
        }
        Type { tags, shape: None }
    }

    /// The element type yielded by `foreach` over a value of this type, if
    /// any (§4.4).
    pub fn get_iterables(&self) -> Option<Type> {
        if self.contains(PrimitiveTag::String) {
            return Some(Type::string());
        }
        if self.contains(PrimitiveTag::Object) {
            return Some(Type::anyq());
        }
        match &self.shape {
            Some(Shape::Iterable { element }) => Some(*element.clone()),
            _ => None,
        }
    }

    /// The return type of calling a value of this type, if any (§4.4).
    pub fn get_callables(&self) -> Option<Type> {
        match &self.shape {
            Some(Shape::Callable { returns, .. }) => Some(*returns.clone()),
            _ if self.contains(PrimitiveTag::Object) => Some(Type::anyq()),
            _ => None,
        }
    }

    /// The static result type of a binary operator applied to `self` and
    /// `other`, or `None` if the operator rejects this operand pairing
    /// (§9 Open Question: "`Type.binary` is a stub returning `Int` for
    /// every operator combination"). Arithmetic widens per
    /// [`Type::compatible_type`]; comparisons and logical operators both
    /// yield `Bool`, the latter only over `Bool` operands.
    pub fn binary(&self, op: BinaryOp, other: &Type) -> Option<Type> {
        use BinaryOp::*;
        match op {
            Add | Sub | Mul | Div | Rem => {
                let widened = self.compatible_type(other);
                if widened.tags == Type::int().tags {
                    Some(Type::int())
                } else if widened.tags == Type::float().tags {
                    Some(Type::float())
                } else {
                    None
                }
            }
            Eq | NotEq => {
                let widened = self.compatible_type(other);
                if widened.is_empty() { None } else { Some(Type::bool()) }
            }
            Lt | LtEq | Gt | GtEq => {
                let widened = self.compatible_type(other);
                if widened.tags == Type::int().tags || widened.tags == Type::float().tags {
                    Some(Type::bool())
                } else {
                    None
                }
            }
            And | Or => {
                if self.tags == Type::bool().tags && other.tags == Type::bool().tags {
                    Some(Type::bool())
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let any = Type::any();
        let anyq = Type::anyq();
        if *self == any {
            return write!(f, "any");
        }
        if *self == anyq {
            return write!(f, "any?");
        }
        if self.tags.len() == 1 {
            return write!(f, "{}", self.tags.iter().next().unwrap());
        }
        if self.tags.len() == 2 && self.tags.contains(&PrimitiveTag::Null) {
            let other = self.tags.iter().find(|t| **t != PrimitiveTag::Null).unwrap();
            return write!(f, "{other}?");
        }
        if self.tags.is_empty() {
            return write!(f, "<incompatible>");
        }
        let rendered: Vec<String> = self.tags.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", rendered.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_renders_bare() {
        assert_eq!(Type::any().to_string(), "any");
        assert_eq!(Type::anyq().to_string(), "any?");
    }

    #[test]
    fn single_nullable_tag_renders_with_suffix() {
        assert_eq!(Type::int().nullable().to_string(), "int?");
    }

    #[test]
    fn int_promotes_to_float_when_target_lacks_int() {
        let value = Value::Int(num_bigint::BigInt::from(3));
        let promoted = Type::float().compatible_value(&value);
        assert_eq!(promoted, Value::Float(3.0));
    }

    #[test]
    fn incompatible_value_yields_void() {
        let value = Value::Bool(true);
        assert_eq!(Type::int().compatible_value(&value), Value::Void);
    }

    #[test]
    fn compatible_type_widens_int_and_float() {
        let result = Type::int().compatible_type(&Type::float());
        assert_eq!(result, Type::float());
    }

    #[test]
    fn incompatible_types_intersect_to_empty() {
        let result = Type::int().compatible_type(&Type::string());
        assert!(result.is_empty());
    }
}
