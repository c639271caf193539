use egg_ast::{CanonicalKey, LazyValue, Proxy, PullIterator, Runner, Value};
use egg_errors::RuntimeError;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ops;

/// The array-literal proxy (§4.3 `VanillaArray`): an ordered, growable
/// sequence of values. `length` is both readable and writable — writing a
/// smaller length truncates, a larger one pads with `Null`.
#[derive(Clone)]
pub struct VanillaArray {
    elements: Rc<RefCell<Vec<Value>>>,
}

impl fmt::Debug for VanillaArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VanillaArray({:?})", self.elements.borrow())
    }
}

impl VanillaArray {
    pub fn new(elements: Vec<Value>) -> Self {
        VanillaArray { elements: Rc::new(RefCell::new(elements)) }
    }

    pub fn into_value(self) -> Value {
        Value::Proxy(Rc::new(self))
    }

    fn index_of(&self, index: &Value) -> Result<usize, RuntimeError> {
        let Value::Int(n) = index else {
            return Err(RuntimeError::UnknownIndex(index.to_debug()));
        };
        let len = self.elements.borrow().len();
        let i = n.to_i64().ok_or_else(|| RuntimeError::IndexOutOfRange(n.to_string()))?;
        if i < 0 || i as usize >= len {
            return Err(RuntimeError::IndexOutOfRange(i.to_string()));
        }
        Ok(i as usize)
    }
}

impl Proxy for VanillaArray {
    fn get_property(&self, name: &str) -> Result<Value, RuntimeError> {
        if name == "length" {
            return Ok(Value::Int(BigInt::from(self.elements.borrow().len())));
        }
        if name == "join" {
            return Ok(crate::proxies::object::array_join(self.elements.clone()));
        }
        Err(RuntimeError::UnknownProperty(name.to_string()))
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if name == "length" {
            let Value::Int(n) = &value else {
                return Err(RuntimeError::IncompatibleType { expected: "int".into(), found: value.type_of().to_string() });
            };
            let new_len = n.to_usize().ok_or_else(|| RuntimeError::IndexOutOfRange(n.to_string()))?;
            let mut elements = self.elements.borrow_mut();
            elements.resize(new_len, Value::Null);
            return Ok(());
        }
        Err(RuntimeError::UnknownProperty(name.to_string()))
    }

    fn mut_property(&self, name: &str, op: &str, lazy: LazyValue) -> Result<Value, RuntimeError> {
        if name != "length" {
            return Err(RuntimeError::UnknownProperty(name.to_string()));
        }
        let current = self.get_property(name)?;
        let assign_op = assign_op_of(op)?;
        let rhs = lazy()?;
        let updated = ops::apply_assign_op(assign_op, &current, rhs)?;
        self.set_property(name, updated.clone())?;
        Ok(updated)
    }

    fn get_index(&self, index: &Value) -> Result<Value, RuntimeError> {
        let i = self.index_of(index)?;
        Ok(self.elements.borrow()[i].clone())
    }

    fn set_index(&self, index: &Value, value: Value) -> Result<(), RuntimeError> {
        let i = self.index_of(index)?;
        self.elements.borrow_mut()[i] = value;
        Ok(())
    }

    fn mut_index(&self, index: &Value, op: &str, lazy: LazyValue) -> Result<Value, RuntimeError> {
        let current = self.get_index(index)?;
        let assign_op = assign_op_of(op)?;
        let rhs = lazy()?;
        let updated = ops::apply_assign_op(assign_op, &current, rhs)?;
        self.set_index(index, updated.clone())?;
        Ok(updated)
    }

    fn del_index(&self, index: &Value) -> Result<(), RuntimeError> {
        let i = self.index_of(index)?;
        self.elements.borrow_mut().remove(i);
        Ok(())
    }

    fn get_iterator(&self) -> Result<PullIterator, RuntimeError> {
        let elements = self.elements.clone();
        let mut cursor = 0usize;
        Ok(Box::new(move || {
            let elements = elements.borrow();
            if cursor >= elements.len() {
                return Ok(Value::Void);
            }
            let value = elements[cursor].clone();
            cursor += 1;
            Ok(value)
        }))
    }

    fn invoke(&self, _runner: &mut dyn Runner, _args: Vec<Value>) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotCallable(self.describe()))
    }

    fn to_underlying(&self) -> CanonicalKey {
        CanonicalKey::Identity(Rc::as_ptr(&self.elements) as usize)
    }

    fn to_string_value(&self) -> String {
        let rendered: Vec<String> = self.elements.borrow().iter().map(|v| v.to_debug()).collect();
        format!("[{}]", rendered.join(", "))
    }

    fn describe(&self) -> String {
        "array".to_string()
    }
}

/// Compound-assign operators arrive from `Assign`/target dispatch as their
/// surface-syntax spelling; translate to the shared `AssignOp` so array and
/// object mutation can reuse [`ops::apply_assign_op`].
pub fn assign_op_of(op: &str) -> Result<egg_ast::AssignOp, RuntimeError> {
    use egg_ast::AssignOp::*;
    Ok(match op {
        "=" => Assign,
        "+=" => AddAssign,
        "-=" => SubAssign,
        "*=" => MulAssign,
        "/=" => DivAssign,
        "%=" => RemAssign,
        other => return Err(RuntimeError::Custom(format!("unknown mutation operator '{other}'"))),
    })
}
