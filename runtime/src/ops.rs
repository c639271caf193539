use egg_ast::{AssignOp, Value};
use egg_errors::RuntimeError;

/// The non-`=` half of a compound assignment, shared between plain
/// variable mutation and the `mut_property`/`mut_index` Proxy hooks
/// (§4.3, §4.7 `Assign`). `current` is the value already stored at the
/// target; `rhs` is the (possibly lazily-evaluated) right-hand side.
pub fn apply_assign_op(op: AssignOp, current: &Value, rhs: Value) -> Result<Value, RuntimeError> {
    match op {
        AssignOp::Assign => Ok(rhs),
        AssignOp::AddAssign => current.add(&rhs),
        AssignOp::SubAssign => current.sub(&rhs),
        AssignOp::MulAssign => current.mul(&rhs),
        AssignOp::DivAssign => current.div(&rhs),
        AssignOp::RemAssign => current.rem(&rhs),
    }
}

/// Whether this operator needs to read the current value at all. `=`
/// does not, so the lazy RHS thunk driving a property/index target can
/// skip reading `get_property`/`get_index` first when it is plain
/// assignment (§9 "Lazy RHS").
pub fn needs_current_value(op: AssignOp) -> bool {
    !matches!(op, AssignOp::Assign)
}

/// The inverse of `proxies::assign_op_of`: the surface spelling an `Assign`
/// node's `AssignOp` crosses the `Proxy::mut_property`/`mut_index` boundary
/// as (those take the operator as a string so `egg-ast` stays ignorant of
/// the parser's `AssignOp` enum).
pub fn assign_op_str(op: AssignOp) -> &'static str {
    use AssignOp::*;
    match op {
        Assign => "=",
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
        RemAssign => "%=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn add_assign_combines_current_and_rhs() {
        let current = Value::Int(BigInt::from(4));
        let rhs = Value::Int(BigInt::from(3));
        let result = apply_assign_op(AssignOp::AddAssign, &current, rhs).unwrap();
        assert_eq!(result, Value::Int(BigInt::from(7)));
    }

    #[test]
    fn plain_assign_ignores_current() {
        let current = Value::Int(BigInt::from(4));
        let rhs = Value::Int(BigInt::from(99));
        let result = apply_assign_op(AssignOp::Assign, &current, rhs).unwrap();
        assert_eq!(result, Value::Int(BigInt::from(99)));
    }
}
