//! The tree-walking Runner (§4.7): drives `Node::execute`/`evaluate` over a
//! linked `Program`, owning the live `SymbolTable<Value>` and implementing
//! `egg_ast::Runner` so `Proxy::invoke` can call back into user-defined
//! functions without this crate leaking into `egg-ast`.

use std::collections::BTreeSet;
use std::rc::Rc;

use egg_ast::{
    AssignOp, BinaryOp, ClosureId, Flavour, NudgeOp, ObjectKey, PrimitiveTag, Runner, Shape,
    SymbolTable, Type, Value,
};
use egg_errors::{AssertionError, RuntimeError};
use egg_span::Location;

use crate::node::{Flow, Node, Outcome, TargetNode};
use crate::program::FunctionDef;
use crate::proxies::{RuntimeException, VanillaArray, VanillaFunction, VanillaObject};
use crate::{globals, string_ops};

fn is_comparison(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq)
}

/// A best-effort reconstruction of a node's surface syntax, used only for
/// the `Assertion is untrue: …` message (§4.6 "preserves structured
/// unary/binary comparison") when the asserted expression isn't itself a
/// comparison. Not a general-purpose pretty-printer — just enough to name
/// the thing that was false.
fn describe_node(node: &Node) -> String {
    use Node::*;
    match node {
        IntLit(n, _) => n.to_string(),
        FloatLit(f, _) => f.to_string(),
        StringLit(s, _) => format!("{:?}", s.iter().collect::<String>()),
        NullLit(_) => "null".to_string(),
        BoolLit(b, _) => b.to_string(),
        VariableGet(name, _) => name.clone(),
        PropertyGet(base, name, _) => format!("{}.{name}", describe_node(base)),
        IndexGet(base, index, _) => format!("{}[{}]", describe_node(base), describe_node(index)),
        Call(callee, args, _) => {
            format!("{}({})", describe_node(callee), args.iter().map(describe_node).collect::<Vec<_>>().join(", "))
        }
        Unary(op, operand, _) => format!("{op}{}", describe_node(operand)),
        Binary(op, l, r, _) => format!("{} {op} {}", describe_node(l), describe_node(r)),
        Ternary(cond, then, els, _) => format!("{} ? {} : {}", describe_node(cond), describe_node(then), describe_node(els)),
        _ => "<expression>".to_string(),
    }
}

/// The live tree-walker (§4.7, §9 "Global singletons"/"avoid open-world
/// inheritance"): one per `Program::run`. `error_location` implements
/// "each node catches to attach its source location (first setter wins)
/// then re-raises" (§4.7 "Exception flow") without threading location
/// through the `Runner`/`Proxy` boundary's fixed `RuntimeError` type.
pub struct TreeWalker<'a> {
    table: SymbolTable<Value>,
    functions: &'a [FunctionDef],
    logger: &'a mut dyn egg_errors::Logger,
    source: Rc<str>,
    error_location: Option<Location>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(functions: &'a [FunctionDef], logger: &'a mut dyn egg_errors::Logger, source: Rc<str>) -> Self {
        let mut table = SymbolTable::new();
        globals::install_globals(&mut table);
        TreeWalker { table, functions, logger, source, error_location: None }
    }

    /// The source location to blame for an unhandled error that reaches
    /// `Program::run` — the innermost node whose `execute`/`evaluate` first
    /// observed it, or this walker's own source if nothing was recorded
    /// (defensive; every real `RuntimeError` passes through at least one
    /// node).
    pub fn error_location(&self) -> Location {
        self.error_location.clone().unwrap_or_else(|| Location::unknown(self.source.clone()))
    }

    fn tag<T>(&mut self, node: &Node, result: Result<T, RuntimeError>) -> Result<T, RuntimeError> {
        if result.is_err() && self.error_location.is_none() {
            self.error_location = Some(node.location().clone());
        }
        result
    }

    /// Runs one module's root `Node::Module` to completion.
    pub fn run_module(&mut self, root: &Node) -> Result<(), RuntimeError> {
        self.execute(root)?;
        Ok(())
    }

    // ---- expression evaluation -------------------------------------------------

    pub fn evaluate(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        let result = self.evaluate_inner(node);
        self.tag(node, result)
    }

    fn evaluate_inner(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        match node {
            Node::IntLit(n, _) => Ok(Value::Int(n.clone())),
            Node::FloatLit(f, _) => Ok(Value::Float(*f)),
            Node::StringLit(s, _) => Ok(Value::String(s.clone())),
            Node::NullLit(_) => Ok(Value::Null),
            Node::BoolLit(b, _) => Ok(Value::Bool(*b)),

            Node::ArrayLit(elements, _) => {
                let mut values = Vec::with_capacity(elements.len());
                for e in elements {
                    let value = self.evaluate(e)?;
                    if matches!(value, Value::Void) {
                        return Err(RuntimeError::VoidElement);
                    }
                    values.push(value);
                }
                Ok(VanillaArray::new(values).into_value())
            }

            Node::ObjectLit(entries, _) => {
                let mut map = egg_ast::ValueMap::new();
                for (key, value_node) in entries {
                    let key_str = match key {
                        ObjectKey::Ident(s) | ObjectKey::String(s) => s.clone(),
                    };
                    let value = self.evaluate(value_node)?;
                    if matches!(value, Value::Void) {
                        return Err(RuntimeError::VoidElement);
                    }
                    map.insert(Value::string(&key_str), value);
                }
                Ok(VanillaObject::new(map).into_value())
            }

            Node::VariableGet(name, _) => match self.table.find(name) {
                Some(entry) => Ok(entry.value.clone()),
                None => Err(RuntimeError::Custom(format!("undefined variable '{name}'"))),
            },

            Node::PropertyGet(base, name, _) => {
                let base_value = self.evaluate(base)?;
                self.get_property(&base_value, name)
            }

            Node::IndexGet(base, index, _) => {
                let base_value = self.evaluate(base)?;
                let index_value = self.evaluate(index)?;
                self.get_index(&base_value, &index_value)
            }

            Node::Call(callee, args, _) => {
                let callee_value = self.evaluate(callee)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for a in args {
                    arg_values.push(self.evaluate(a)?);
                }
                self.invoke(&callee_value, arg_values)
            }

            Node::Unary(op, operand, _) => {
                let value = self.evaluate(operand)?;
                match op {
                    egg_ast::UnaryOp::Neg => value.neg(),
                    egg_ast::UnaryOp::Not => value.not(),
                }
            }

            Node::Binary(op, left, right, _) => self.evaluate_binary(*op, left, right),

            Node::Ternary(cond, then_value, else_value, _) => {
                let cond_value = self.evaluate(cond)?;
                match cond_value {
                    Value::Bool(true) => self.evaluate(then_value),
                    Value::Bool(false) => self.evaluate(else_value),
                    other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
                }
            }

            other => Err(RuntimeError::Custom(format!("{other:?} is not an expression"))),
        }
    }

    fn evaluate_binary(&mut self, op: BinaryOp, left: &Node, right: &Node) -> Result<Value, RuntimeError> {
        use BinaryOp::*;
        match op {
            And => {
                let lhs = self.evaluate(left)?;
                match lhs {
                    Value::Bool(false) => Ok(Value::Bool(false)),
                    Value::Bool(true) => match self.evaluate(right)? {
                        Value::Bool(b) => Ok(Value::Bool(b)),
                        other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
                    },
                    other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
                }
            }
            Or => {
                let lhs = self.evaluate(left)?;
                match lhs {
                    Value::Bool(true) => Ok(Value::Bool(true)),
                    Value::Bool(false) => match self.evaluate(right)? {
                        Value::Bool(b) => Ok(Value::Bool(b)),
                        other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
                    },
                    other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
                }
            }
            Add | Sub | Mul | Div | Rem => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;
                arithmetic(op, &lhs, &rhs)
            }
            Eq | NotEq | Lt | LtEq | Gt | GtEq => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;
                Ok(Value::Bool(compare(op, &lhs, &rhs)?))
            }
        }
    }

    fn get_property(&self, base: &Value, name: &str) -> Result<Value, RuntimeError> {
        match base {
            Value::String(s) => {
                if name == "length" {
                    return Ok(Value::Int(s.len().into()));
                }
                if crate::proxies::string_method_names().contains(&name) {
                    return Ok(crate::proxies::StringMethod::new(s.clone(), name).into_value());
                }
                Err(RuntimeError::UnknownProperty(name.to_string()))
            }
            Value::Proxy(p) => p.get_property(name),
            other => Err(RuntimeError::Custom(format!("{} has no property '{name}'", other.type_of()))),
        }
    }

    fn get_index(&self, base: &Value, index: &Value) -> Result<Value, RuntimeError> {
        match base {
            Value::String(s) => {
                let Value::Int(n) = index else {
                    return Err(RuntimeError::UnknownIndex(index.to_debug()));
                };
                let i = num_traits::ToPrimitive::to_i64(n).unwrap_or(-1);
                if i < 0 || i as usize >= s.len() {
                    return Err(RuntimeError::IndexOutOfRange(i.to_string()));
                }
                Ok(Value::String(Rc::new(vec![s[i as usize]])))
            }
            Value::Proxy(p) => p.get_index(index),
            other => Err(RuntimeError::Custom(format!("{} is not indexable", other.type_of()))),
        }
    }

    fn invoke(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match callee {
            Value::Proxy(p) => {
                let p = p.clone();
                p.invoke(self, args)
            }
            other => Err(RuntimeError::NotCallable(other.type_of().to_string())),
        }
    }

    // ---- statement execution ----------------------------------------------

    pub fn execute(&mut self, node: &Node) -> Result<Outcome, RuntimeError> {
        let result = self.execute_inner(node);
        self.tag(node, result)
    }

    fn execute_inner(&mut self, node: &Node) -> Result<Outcome, RuntimeError> {
        match node {
            Node::ExprStatement(expr, _) => {
                self.evaluate(expr)?;
                Ok(Outcome::through())
            }

            Node::Assert(expr, _) => self.execute_assert(expr),

            Node::VarDecl { name, ty, init, .. } => {
                let value = self.evaluate(init)?;
                let coerced = ty.compatible_value(&value);
                self.table.add(name, Flavour::Variable, ty.clone(), coerced).ok();
                Ok(Outcome::through())
            }

            Node::FuncDecl { name, closure, .. } => {
                let ty = self.function_type_of(*closure);
                let value = VanillaFunction::new(name.clone(), *closure).into_value();
                self.table.add(name, Flavour::Function, ty, value).ok();
                Ok(Outcome::through())
            }

            Node::Assign(target, op, value_expr, _) => {
                self.execute_assign(target, *op, value_expr)?;
                Ok(Outcome::through())
            }

            Node::Nudge(target, op, _) => {
                self.execute_nudge(target, *op)?;
                Ok(Outcome::through())
            }

            Node::Block(statements, _) => self.execute_scoped(statements),
            Node::Module(statements, _) => self.execute_statements(statements),

            Node::If { cond, then_branch, else_branch, .. } => {
                let cond_value = self.evaluate(cond)?;
                match cond_value {
                    Value::Bool(true) => self.execute(then_branch),
                    Value::Bool(false) => match else_branch {
                        Some(e) => self.execute(e),
                        None => Ok(Outcome::through()),
                    },
                    other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
                }
            }

            Node::IfGuard { name, ty, source, then_branch, else_branch, .. } => {
                let source_value = self.evaluate(source)?;
                let coerced = ty.compatible_value(&source_value);
                if !matches!(coerced, Value::Void) {
                    self.table.push();
                    self.table.add(name, Flavour::Guard, ty.clone(), coerced).ok();
                    let outcome = self.execute(then_branch);
                    self.table.pop();
                    outcome
                } else {
                    match else_branch {
                        Some(e) => self.execute(e),
                        None => Ok(Outcome::through()),
                    }
                }
            }

            Node::For { init, cond, advance, body, .. } => self.execute_for(init, cond, advance, body),

            Node::Foreach { name, ty, source, body, .. } => self.execute_foreach(name, ty, source, body),

            Node::While { cond, body, .. } => self.execute_while(cond, body),

            Node::WhileGuard { name, ty, source, body, .. } => self.execute_while_guard(name, ty, source, body),

            Node::Return(value, _) => {
                let value = match value {
                    Some(v) => self.evaluate(v)?,
                    None => Value::Void,
                };
                Ok(Outcome::ret(value))
            }

            Node::Try { try_block, catches, finally_block, location } => {
                self.execute_try(try_block, catches, finally_block.as_deref(), location)
            }

            other => Err(RuntimeError::Custom(format!("{other:?} is not a statement"))),
        }
    }

    fn execute_assert(&mut self, expr: &Node) -> Result<Outcome, RuntimeError> {
        if let Node::Binary(op, l, r, _) = expr {
            if is_comparison(*op) {
                let lhs = self.evaluate(l)?;
                let rhs = self.evaluate(r)?;
                return if compare(*op, &lhs, &rhs)? {
                    Ok(Outcome::through())
                } else {
                    Err(RuntimeError::Assertion(
                        AssertionError::Comparison { lhs: lhs.to_debug(), op: op.to_string(), rhs: rhs.to_debug() }
                            .to_string(),
                    ))
                };
            }
        }
        match self.evaluate(expr)? {
            Value::Bool(true) => Ok(Outcome::through()),
            Value::Bool(false) => Err(RuntimeError::Assertion(AssertionError::Plain(describe_node(expr)).to_string())),
            other => Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
        }
    }

    /// Runs `statements` inside a fresh inner scope, popping it on every
    /// exit path — normal completion, an early `Break`/`Continue`/`Return`,
    /// or an error (§5 "scope symmetry... even when execute raises").
    fn execute_scoped(&mut self, statements: &[Node]) -> Result<Outcome, RuntimeError> {
        self.table.push();
        let result = self.execute_statements(statements);
        self.table.pop();
        result
    }

    fn execute_statements(&mut self, statements: &[Node]) -> Result<Outcome, RuntimeError> {
        for statement in statements {
            let outcome = self.execute(statement)?;
            if !outcome.is_through() {
                return Ok(outcome);
            }
        }
        Ok(Outcome::through())
    }

    fn execute_for(
        &mut self,
        init: &Option<Box<Node>>,
        cond: &Option<Box<Node>>,
        advance: &Option<Box<Node>>,
        body: &Node,
    ) -> Result<Outcome, RuntimeError> {
        self.table.push();
        let result = (|| {
            if let Some(init) = init {
                self.execute(init)?;
            }
            loop {
                if let Some(cond) = cond {
                    match self.evaluate(cond)? {
                        Value::Bool(true) => {}
                        Value::Bool(false) => break,
                        other => {
                            return Err(RuntimeError::IncompatibleType {
                                expected: "bool".into(),
                                found: other.type_of().to_string(),
                            })
                        }
                    }
                }
                let outcome = self.execute(body)?;
                match outcome.flow {
                    Flow::Through | Flow::Continue => {}
                    Flow::Break => break,
                    Flow::Return => return Ok(outcome),
                }
                if let Some(advance) = advance {
                    self.execute(advance)?;
                }
            }
            Ok(Outcome::through())
        })();
        self.table.pop();
        result
    }

    fn execute_while(&mut self, cond: &Node, body: &Node) -> Result<Outcome, RuntimeError> {
        loop {
            match self.evaluate(cond)? {
                Value::Bool(true) => {}
                Value::Bool(false) => break,
                other => return Err(RuntimeError::IncompatibleType { expected: "bool".into(), found: other.type_of().to_string() }),
            }
            let outcome = self.execute(body)?;
            match outcome.flow {
                Flow::Through | Flow::Continue => {}
                Flow::Break => break,
                Flow::Return => return Ok(outcome),
            }
        }
        Ok(Outcome::through())
    }

    fn execute_while_guard(&mut self, name: &str, ty: &Type, source: &Node, body: &Node) -> Result<Outcome, RuntimeError> {
        loop {
            let source_value = self.evaluate(source)?;
            let coerced = ty.compatible_value(&source_value);
            if matches!(coerced, Value::Void) {
                break;
            }
            self.table.push();
            self.table.add(name, Flavour::Guard, ty.clone(), coerced).ok();
            let outcome = self.execute(body);
            self.table.pop();
            let outcome = outcome?;
            match outcome.flow {
                Flow::Through | Flow::Continue => {}
                Flow::Break => break,
                Flow::Return => return Ok(outcome),
            }
        }
        Ok(Outcome::through())
    }

    fn execute_foreach(&mut self, name: &str, ty: &Type, source: &Node, body: &Node) -> Result<Outcome, RuntimeError> {
        let source_value = self.evaluate(source)?;
        let mut pull = self.iterator_of(&source_value)?;
        loop {
            let next = pull()?;
            if matches!(next, Value::Void) {
                break;
            }
            let coerced = ty.compatible_value(&next);
            self.table.push();
            self.table.add(name, Flavour::Variable, ty.clone(), coerced).ok();
            let outcome = self.execute(body);
            self.table.pop();
            let outcome = outcome?;
            match outcome.flow {
                Flow::Through | Flow::Continue => {}
                Flow::Break => break,
                Flow::Return => return Ok(outcome),
            }
        }
        Ok(Outcome::through())
    }

    fn iterator_of(&self, value: &Value) -> Result<egg_ast::PullIterator, RuntimeError> {
        match value {
            Value::String(s) => {
                let s = s.clone();
                let mut cursor = 0usize;
                Ok(Box::new(move || {
                    if cursor >= s.len() {
                        return Ok(Value::Void);
                    }
                    let ch = s[cursor];
                    cursor += 1;
                    Ok(Value::String(Rc::new(vec![ch])))
                }))
            }
            Value::Proxy(p) => p.get_iterator(),
            other => Err(RuntimeError::Custom(format!("{} is not iterable", other.type_of()))),
        }
    }

    fn execute_try(
        &mut self,
        try_block: &Node,
        catches: &[(String, Type, Node)],
        finally_block: Option<&Node>,
        location: &Location,
    ) -> Result<Outcome, RuntimeError> {
        // §7/§8: despite `Assertion` being its own diagnostic origin for
        // uncaught-error rendering, the worked example `try { assert(1 ==
        // 2); } catch (any e) { print("caught"); }` catches it like any
        // other runtime error — so assertion failures are dispatched to
        // catch clauses the same as everything else here.
        let mut outcome_result = match self.execute(try_block) {
            Ok(outcome) => Ok(outcome),
            Err(error) => self.dispatch_catches(&error, catches, location).unwrap_or(Err(error)),
        };

        if let Some(finally) = finally_block {
            match self.execute(finally) {
                Ok(finally_outcome) if !finally_outcome.is_through() => {
                    // §9 Open Question: "a reasonable convention is
                    // finally-Return wins" — adopted verbatim.
                    outcome_result = Ok(finally_outcome);
                }
                Ok(_) => {}
                Err(finally_error) => outcome_result = Err(finally_error),
            }
        }

        outcome_result
    }

    /// Tests each catch clause in declaration order against `error`,
    /// returning `Some(result)` if one matched (its body's own result,
    /// `Ok` or `Err`), or `None` if every clause was skipped so the caller
    /// should propagate the original error unchanged (§4.7 `Try`).
    fn dispatch_catches(
        &mut self,
        error: &RuntimeError,
        catches: &[(String, Type, Node)],
        location: &Location,
    ) -> Option<Result<Outcome, RuntimeError>> {
        let blame = self.error_location.clone().unwrap_or_else(|| location.clone());
        let exception = RuntimeException::new(error, &blame).into_value();
        for (name, ty, body) in catches {
            let coerced = ty.compatible_value(&exception);
            if matches!(coerced, Value::Void) {
                continue;
            }
            self.table.push();
            self.table.add(name, Flavour::Exception, ty.clone(), coerced).ok();
            let result = self.execute(body);
            self.table.pop();
            self.error_location = None;
            return Some(result);
        }
        None
    }

    // ---- assignment targets -------------------------------------------------

    fn execute_assign(&mut self, target: &TargetNode, op: AssignOp, value_expr: &Node) -> Result<Value, RuntimeError> {
        match target {
            TargetNode::Variable(name, _) => {
                if op == AssignOp::Assign {
                    let value = self.evaluate(value_expr)?;
                    self.set_variable(name, value.clone())?;
                    Ok(value)
                } else {
                    let current = self.get_variable(name)?;
                    let rhs = self.evaluate(value_expr)?;
                    let updated = crate::ops::apply_assign_op(op, &current, rhs)?;
                    self.set_variable(name, updated.clone())?;
                    Ok(updated)
                }
            }
            TargetNode::Property(base, name, _) => {
                let base_value = self.evaluate(base)?;
                let op_str = crate::ops::assign_op_str(op);
                self.mutate_property(&base_value, name, op_str, value_expr)
            }
            TargetNode::Index(base, index, _) => {
                let base_value = self.evaluate(base)?;
                let index_value = self.evaluate(index)?;
                let op_str = crate::ops::assign_op_str(op);
                self.mutate_index(&base_value, &index_value, op_str, value_expr)
            }
        }
    }

    fn execute_nudge(&mut self, target: &TargetNode, op: NudgeOp) -> Result<Value, RuntimeError> {
        let increment = op == NudgeOp::Increment;
        match target {
            TargetNode::Variable(name, _) => {
                let current = self.get_variable(name)?;
                let (old, new) = current.nudge(increment)?;
                self.set_variable(name, new)?;
                Ok(old)
            }
            TargetNode::Property(base, name, _) => {
                let base_value = self.evaluate(base)?;
                self.mutate_property_nudge(&base_value, name, increment)
            }
            TargetNode::Index(base, index, _) => {
                let base_value = self.evaluate(base)?;
                let index_value = self.evaluate(index)?;
                self.mutate_index_nudge(&base_value, &index_value, increment)
            }
        }
    }

    fn get_variable(&self, name: &str) -> Result<Value, RuntimeError> {
        self.table.find(name).map(|e| e.value.clone()).ok_or_else(|| RuntimeError::Custom(format!("undefined variable '{name}'")))
    }

    fn set_variable(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let entry = self
            .table
            .find_mut(name)
            .ok_or_else(|| RuntimeError::Custom(format!("undefined variable '{name}'")))?;
        if !entry.flavour.is_mutable() {
            return Err(RuntimeError::AssignmentImmutable(name.to_string()));
        }
        let coerced = entry.ty.compatible_value(&value);
        if matches!(coerced, Value::Void) && !matches!(value, Value::Void) {
            return Err(RuntimeError::IncompatibleType { expected: entry.ty.to_string(), found: value.type_of().to_string() });
        }
        entry.value = coerced;
        Ok(())
    }

    fn mutate_property(&mut self, base: &Value, name: &str, op: &str, value_expr: &Node) -> Result<Value, RuntimeError> {
        match base {
            Value::String(_) => Err(RuntimeError::StringPropertyImmutable(name.to_string())),
            Value::Proxy(p) => {
                let p = p.clone();
                let mut lazy = || self.evaluate(value_expr);
                p.mut_property(name, op, &mut lazy)
            }
            other => Err(RuntimeError::Custom(format!("{} has no property '{name}'", other.type_of()))),
        }
    }

    /// `++`/`--` on a property target (§4.3): read, numerically nudge, write
    /// back — there is no assignment-operator spelling for this, so it
    /// bypasses `mut_property` and goes straight through `get_property`/
    /// `set_property`.
    fn mutate_property_nudge(&mut self, base: &Value, name: &str, increment: bool) -> Result<Value, RuntimeError> {
        match base {
            Value::String(_) => Err(RuntimeError::StringPropertyImmutable(name.to_string())),
            Value::Proxy(p) => {
                let current = p.get_property(name)?;
                let (old, new) = current.nudge(increment)?;
                p.set_property(name, new)?;
                Ok(old)
            }
            other => Err(RuntimeError::Custom(format!("{} has no property '{name}'", other.type_of()))),
        }
    }

    fn mutate_index(&mut self, base: &Value, index: &Value, op: &str, value_expr: &Node) -> Result<Value, RuntimeError> {
        match base {
            Value::String(_) => Err(RuntimeError::StringIndexImmutable),
            Value::Proxy(p) => {
                let p = p.clone();
                let mut lazy = || self.evaluate(value_expr);
                p.mut_index(index, op, &mut lazy)
            }
            other => Err(RuntimeError::Custom(format!("{} is not indexable", other.type_of()))),
        }
    }

    fn mutate_index_nudge(&mut self, base: &Value, index: &Value, increment: bool) -> Result<Value, RuntimeError> {
        match base {
            Value::String(_) => Err(RuntimeError::StringIndexImmutable),
            Value::Proxy(p) => {
                let current = p.get_index(index)?;
                let (old, new) = current.nudge(increment)?;
                p.set_index(index, new)?;
                Ok(old)
            }
            other => Err(RuntimeError::Custom(format!("{} is not indexable", other.type_of()))),
        }
    }

    fn function_type_of(&self, closure: ClosureId) -> Type {
        let def = &self.functions[closure.0];
        let params: Vec<Type> = def.params.iter().map(|(_, t)| t.clone()).collect();
        Type {
            tags: BTreeSet::from([PrimitiveTag::Object]),
            shape: Some(Shape::Callable { params, returns: Box::new(def.return_type.clone()) }),
        }
    }
}

impl<'a> Runner for TreeWalker<'a> {
    fn call_closure(&mut self, id: ClosureId, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let def = self.functions[id.0].clone();
        if args.len() != def.params.len() {
            return Err(RuntimeError::ArityMismatch { expected: def.params.len(), found: args.len() });
        }

        // §4.6/§9: a function body closes over the global scope only, not
        // whatever locals happen to be live at its call site.
        let isolated = self.table.isolate();
        self.table.push();
        for ((pname, pty), arg) in def.params.iter().zip(args) {
            let coerced = pty.compatible_value(&arg);
            self.table.add(pname, Flavour::Argument, pty.clone(), coerced).ok();
        }
        let result = self.execute(&def.body);
        self.table.pop();
        self.table.restore(isolated);

        result.map(|outcome| match outcome.flow {
            Flow::Return => outcome.value,
            _ => Value::Void,
        })
    }

    fn log_print(&mut self, text: String) {
        let location = Location::unknown(self.source.clone());
        self.logger.log(egg_errors::Diagnostic::new(
            egg_errors::Origin::Runtime,
            egg_errors::Severity::Print,
            location,
            egg_errors::Message::new(text),
        ));
    }
}

fn arithmetic(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    use BinaryOp::*;
    match op {
        Add => lhs.add(rhs),
        Sub => lhs.sub(rhs),
        Mul => lhs.mul(rhs),
        Div => lhs.div(rhs),
        Rem => lhs.rem(rhs),
        _ => unreachable!("arithmetic() called with non-arithmetic operator"),
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool, RuntimeError> {
    use BinaryOp::*;
    match op {
        Eq => Ok(lhs.equals(rhs)),
        NotEq => Ok(!lhs.equals(rhs)),
        Lt | LtEq | Gt | GtEq => {
            let ordering = lhs.compare(rhs).ok_or_else(|| RuntimeError::UnsupportedBinaryOperation {
                op: op.to_string(),
                lhs: lhs.type_of().to_string(),
                rhs: rhs.type_of().to_string(),
            })?;
            Ok(match op {
                Lt => ordering.is_lt(),
                LtEq => ordering.is_le(),
                Gt => ordering.is_gt(),
                GtEq => ordering.is_ge(),
                _ => unreachable!(),
            })
        }
        _ => unreachable!("compare() called with non-comparison operator"),
    }
}

#[allow(unused_imports)]
use string_ops as _string_ops_kept_for_proxies;

#[cfg(test)]
mod tests {
    use super::*;
    use egg_errors::VecLogger;
    use egg_span::Location as Loc;

    fn eval_program(source: &str) -> (Vec<String>, Result<(), RuntimeError>) {
        let cst = egg_parser::Parser::from_str(Rc::from("t.egg"), source).unwrap().parse_module().unwrap();
        let ast = egg_ast::lower(&cst).unwrap();
        let handler = egg_errors::Handler::new();
        let program = egg_passes::Linker::new(&handler).with_module(Rc::from("t.egg"), ast).link().unwrap();
        let mut logger = VecLogger::new();
        let mut walker = TreeWalker::new(&program.functions, &mut logger, Rc::from("t.egg"));
        let mut result = Ok(());
        for module in &program.modules {
            if let Err(e) = walker.run_module(&module.root) {
                result = Err(e);
                break;
            }
        }
        let _ = Loc::unknown(Rc::from("t.egg"));
        (logger.entries.iter().map(|d| d.message.to_string()).collect(), result)
    }

    #[test]
    fn prints_hello_world() {
        let (prints, result) = eval_program(r#"print("hello, world");"#);
        assert!(result.is_ok());
        assert_eq!(prints, vec!["hello, world".to_string()]);
    }

    #[test]
    fn for_loop_prints_counter() {
        let (prints, result) = eval_program("var i = 0; for (; i < 3; ++i) { print(i); }");
        assert!(result.is_ok());
        assert_eq!(prints, vec!["0", "1", "2"]);
    }

    #[test]
    fn assertion_failure_reports_operands() {
        let (_, result) = eval_program("assert(1 == 2);");
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Assertion is untrue: 1 == 2");
    }

    #[test]
    fn try_catch_recovers_from_assertion() {
        // §8 scenario 7: a failed `assert` inside `try` is caught like any
        // other runtime error, even though its diagnostic origin tag stays
        // `Assertion` when left uncaught.
        let (prints, result) = eval_program(r#"try { assert(1 == 2); } catch (any e) { print("caught"); }"#);
        assert!(result.is_ok());
        assert_eq!(prints, vec!["caught".to_string()]);
    }

    #[test]
    fn try_catch_recovers_from_runtime_error() {
        let (prints, result) = eval_program(r#"try { int x = 1 / 0; } catch (any e) { print("caught"); }"#);
        assert!(result.is_ok());
        assert_eq!(prints, vec!["caught".to_string()]);
    }

    #[test]
    fn string_methods_slice_and_pad() {
        let (prints, result) =
            eval_program(r#"print("beggar".slice(1, -2)); print("spoon".slice(-2)); print("egg".padStart(8));"#);
        assert!(result.is_ok());
        assert_eq!(prints, vec!["egg", "on", "     egg"]);
    }

    #[test]
    fn recursive_function_call_works() {
        let (prints, result) = eval_program("int fact(int n) { return n <= 1 ? 1 : n * fact(n - 1); } print(fact(5));");
        assert!(result.is_ok());
        assert_eq!(prints, vec!["120".to_string()]);
    }

    #[test]
    fn array_length_and_index() {
        let (prints, result) = eval_program("var a = [1, 2, 3]; print(a.length); print(a[1]);");
        assert!(result.is_ok());
        assert_eq!(prints, vec!["3", "2"]);
    }

    #[test]
    fn array_literal_rejects_a_void_element_from_a_fallen_through_call() {
        // `int maybe()` falls off the end without a `return`, so it yields
        // `Value::Void` at runtime even though its declared type is `int`
        // (the Linker's static check can't see this; only the walker can).
        let (_, result) = eval_program("int maybe() { if (false) { return 1; } } var a = [maybe()];");
        assert_eq!(result.unwrap_err(), RuntimeError::VoidElement);
    }

    #[test]
    fn object_literal_rejects_a_void_element_from_a_fallen_through_call() {
        let (_, result) = eval_program("int maybe() { if (false) { return 1; } } var o = { x: maybe() };");
        assert_eq!(result.unwrap_err(), RuntimeError::VoidElement);
    }
}
