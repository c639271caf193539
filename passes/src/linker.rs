use egg_ast::{
    Ast, AssignOp, BinaryOp, ClosureId, DuplicateName, Flavour, ObjectKey, PrimitiveTag, Shape,
    SymbolTable, Target, Type, TypeBase, TypeCst, UnaryOp,
};
use egg_errors::{Handler, LinkerError};
use egg_runtime::{global_types, FunctionDef, Module as RtModule, Node, Program, TargetNode};
use egg_span::{Location, SourceName};
use std::collections::BTreeSet;
use std::rc::Rc;

/// The Linker's own type-level symbol table carries no payload per entry —
/// it only needs names, flavours and types, not the runtime values a
/// `TreeWalker`'s table holds (§4.5, §4.6).
type LinkTable = SymbolTable<()>;

/// Resolves a written-out [`TypeCst`] to a static [`Type`], or `None` for
/// `var`/`var?` (those are inferred from an initializer, not looked up).
fn type_from_cst(ty: &TypeCst) -> Option<Type> {
    let base = match ty.base {
        TypeBase::Void => Type::void(),
        TypeBase::Bool => Type::bool(),
        TypeBase::Int => Type::int(),
        TypeBase::Float => Type::float(),
        TypeBase::String => Type::string(),
        TypeBase::Object => Type::object(),
        TypeBase::Any => {
            if ty.nullable {
                Type::anyq()
            } else {
                Type::any()
            }
        }
        TypeBase::Var => return None,
    };
    Some(if ty.nullable { base.nullable() } else { base })
}

/// Applies the `var`/`var?` inference rule (§4.6): a written type is used
/// verbatim, `var` drops `Null` from the initializer/source type, `var?`
/// adds it.
fn inferred_type(ty: &TypeCst, from: &Type) -> Type {
    match type_from_cst(ty) {
        Some(t) => t,
        None => {
            if ty.nullable {
                from.nullable()
            } else {
                from.without_null()
            }
        }
    }
}

fn assign_op_to_binary(op: AssignOp) -> Option<BinaryOp> {
    match op {
        AssignOp::Assign => None,
        AssignOp::AddAssign => Some(BinaryOp::Add),
        AssignOp::SubAssign => Some(BinaryOp::Sub),
        AssignOp::MulAssign => Some(BinaryOp::Mul),
        AssignOp::DivAssign => Some(BinaryOp::Div),
        AssignOp::RemAssign => Some(BinaryOp::Rem),
    }
}

fn function_type(params: &[Type], returns: Type) -> Type {
    Type {
        tags: BTreeSet::from([PrimitiveTag::Object]),
        shape: Some(Shape::Callable { params: params.to_vec(), returns: Box::new(returns) }),
    }
}

/// Resolves parsed modules into a [`Program`] of runtime nodes (§4.6, §4.7).
/// Mirrors the grounding corpus's resolver: a single pass over the AST,
/// binding names into a scoped [`SymbolTable`], recovering from mismatches by
/// substituting `any` and continuing rather than aborting (§7 "the linker
/// itself does not throw on recoverable mismatches — it records them and
/// continues").
pub struct Linker<'a> {
    handler: &'a Handler,
    table: LinkTable,
    functions: Vec<FunctionDef>,
    modules: Vec<(SourceName, Ast)>,
    return_stack: Vec<Type>,
}

impl<'a> Linker<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        let mut table = LinkTable::new();
        for (name, ty) in global_types() {
            table.builtin(name, ty, ());
        }
        Self { handler, table, functions: Vec::new(), modules: Vec::new(), return_stack: Vec::new() }
    }

    /// Queues a module to be resolved by [`Self::link`]. All queued modules
    /// share the same global scope and function table.
    pub fn with_module(mut self, source: SourceName, ast: Ast) -> Self {
        self.modules.push((source, ast));
        self
    }

    /// Resolves every queued module. Returns `Err(())` if any diagnostic of
    /// `Severity::Error` was emitted along the way; the diagnostics
    /// themselves are read back off the `Handler` by the caller.
    pub fn link(mut self) -> Result<Program, ()> {
        let pending = std::mem::take(&mut self.modules);
        let mut modules = Vec::with_capacity(pending.len());
        for (source, ast) in pending {
            let root = self.resolve(&ast).0;
            modules.push(RtModule { source, root });
        }
        if self.handler.has_errors() {
            return Err(());
        }
        Ok(Program { modules, functions: self.functions })
    }

    fn emit(&self, error: LinkerError, location: Location) {
        use egg_errors::StageError;
        self.handler.emit(error.at(location));
    }

    /// Resolves one AST node to its runtime [`Node`] and static [`Type`].
    /// Statement-kind nodes always report `Type::void()`; the type only
    /// matters for expression-kind nodes.
    fn resolve(&mut self, ast: &Ast) -> (Node, Type) {
        match ast {
            Ast::IntLit(s, loc) => {
                let n = s.parse::<num_bigint::BigInt>().unwrap_or_default();
                (Node::IntLit(n, loc.clone()), Type::int())
            }
            Ast::FloatLit(s, loc) => {
                let f = s.parse::<f64>().unwrap_or(f64::NAN);
                (Node::FloatLit(f, loc.clone()), Type::float())
            }
            Ast::StringLit(s, loc) => {
                (Node::StringLit(Rc::new(s.chars().collect()), loc.clone()), Type::string())
            }
            Ast::Null(loc) => (Node::NullLit(loc.clone()), Type::null()),
            Ast::True(loc) => (Node::BoolLit(true, loc.clone()), Type::bool()),
            Ast::False(loc) => (Node::BoolLit(false, loc.clone()), Type::bool()),

            Ast::Ident(name, loc) => {
                let ty = match self.table.find(name) {
                    Some(entry) => entry.ty.clone(),
                    None => {
                        self.emit(LinkerError::UndefinedIdentifier(name.clone()), loc.clone());
                        Type::any()
                    }
                };
                (Node::VariableGet(name.clone(), loc.clone()), ty)
            }

            Ast::ArrayLit(elements, loc) => {
                let mut nodes = Vec::with_capacity(elements.len());
                let mut element_ty: Option<Type> = None;
                for e in elements {
                    let (n, t) = self.resolve(e);
                    if t.tags.contains(&PrimitiveTag::Void) {
                        self.emit(LinkerError::VoidElement, e.location().clone());
                    }
                    element_ty = Some(match element_ty {
                        Some(acc) => acc.union(&t),
                        None => t,
                    });
                    nodes.push(n);
                }
                let element = element_ty.unwrap_or_else(Type::any);
                let ty = Type {
                    tags: BTreeSet::from([PrimitiveTag::Object]),
                    shape: Some(Shape::Iterable { element: Box::new(element) }),
                };
                (Node::ArrayLit(nodes, loc.clone()), ty)
            }

            Ast::ObjectLit(entries, loc) => {
                let nodes: Vec<(ObjectKey, Node)> = entries
                    .iter()
                    .map(|(k, v)| {
                        let (n, t) = self.resolve(v);
                        if t.tags.contains(&PrimitiveTag::Void) {
                            self.emit(LinkerError::VoidElement, v.location().clone());
                        }
                        (k.clone(), n)
                    })
                    .collect();
                (Node::ObjectLit(nodes, loc.clone()), Type::object())
            }

            Ast::Property(base, name, loc) => {
                let (base_node, _) = self.resolve(base);
                (Node::PropertyGet(Box::new(base_node), name.clone(), loc.clone()), Type::anyq())
            }

            Ast::Index(base, index, loc) => {
                let (base_node, _) = self.resolve(base);
                let (index_node, _) = self.resolve(index);
                (Node::IndexGet(Box::new(base_node), Box::new(index_node), loc.clone()), Type::anyq())
            }

            Ast::Call(callee, args, loc) => {
                let (callee_node, callee_ty) = self.resolve(callee);
                let arg_nodes: Vec<Node> = args.iter().map(|a| self.resolve(a).0).collect();
                let ret = callee_ty.get_callables().unwrap_or_else(|| {
                    self.emit(
                        LinkerError::Custom(format!("Type '{callee_ty}' is not callable")),
                        loc.clone(),
                    );
                    Type::anyq()
                });
                (Node::Call(Box::new(callee_node), arg_nodes, loc.clone()), ret)
            }

            Ast::Unary(op, operand, loc) => {
                let (operand_node, operand_ty) = self.resolve(operand);
                let ty = match op {
                    UnaryOp::Neg => {
                        if operand_ty.tags == Type::int().tags {
                            Type::int()
                        } else if operand_ty.tags == Type::float().tags {
                            Type::float()
                        } else {
                            self.emit(
                                LinkerError::Custom(format!("Cannot negate a value of type '{operand_ty}'")),
                                loc.clone(),
                            );
                            Type::any()
                        }
                    }
                    UnaryOp::Not => {
                        if operand_ty.tags != Type::bool().tags {
                            self.emit(
                                LinkerError::Custom(format!("'!' requires bool, found '{operand_ty}'")),
                                loc.clone(),
                            );
                        }
                        Type::bool()
                    }
                };
                (Node::Unary(*op, Box::new(operand_node), loc.clone()), ty)
            }

            Ast::Binary(op, left, right, loc) => {
                let (left_node, left_ty) = self.resolve(left);
                let (right_node, right_ty) = self.resolve(right);
                let ty = left_ty.binary(*op, &right_ty).unwrap_or_else(|| {
                    self.emit(
                        LinkerError::Custom(format!(
                            "Operator '{op}' is not defined for '{left_ty}' and '{right_ty}'"
                        )),
                        loc.clone(),
                    );
                    Type::any()
                });
                (Node::Binary(*op, Box::new(left_node), Box::new(right_node), loc.clone()), ty)
            }

            Ast::Ternary(cond, then_value, else_value, loc) => {
                let (cond_node, cond_ty) = self.resolve(cond);
                if cond_ty.tags != Type::bool().tags {
                    self.emit(
                        LinkerError::Custom(format!("Ternary condition must be bool, found '{cond_ty}'")),
                        loc.clone(),
                    );
                }
                let (then_node, then_ty) = self.resolve(then_value);
                let (else_node, else_ty) = self.resolve(else_value);
                let ty = then_ty.union(&else_ty);
                (
                    Node::Ternary(Box::new(cond_node), Box::new(then_node), Box::new(else_node), loc.clone()),
                    ty,
                )
            }

            Ast::ExprStatement(expr, loc) => {
                let (node, _) = self.resolve(expr);
                (Node::ExprStatement(Box::new(node), loc.clone()), Type::void())
            }

            Ast::Assert(expr, loc) => {
                let (node, ty) = self.resolve(expr);
                if ty.tags != Type::bool().tags {
                    self.emit(
                        LinkerError::Custom(format!("assert requires bool, found '{ty}'")),
                        loc.clone(),
                    );
                }
                (Node::Assert(Box::new(node), loc.clone()), Type::void())
            }

            Ast::VarDecl { ty, name, init, location } => {
                let (init_node, init_ty) = self.resolve(init);
                let declared = type_from_cst(ty);
                if let Some(declared_ty) = &declared {
                    if declared_ty.compatible_type(&init_ty).is_empty() {
                        self.emit(
                            LinkerError::IncompatibleType {
                                expected: declared_ty.to_string(),
                                found: init_ty.to_string(),
                            },
                            location.clone(),
                        );
                    }
                }
                let final_ty = inferred_type(ty, &init_ty);
                if let Err(DuplicateName(n)) = self.table.add(name, Flavour::Variable, final_ty.clone(), ()) {
                    self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                }
                (
                    Node::VarDecl { name: name.clone(), ty: final_ty, init: Box::new(init_node), location: location.clone() },
                    Type::void(),
                )
            }

            Ast::FuncDecl { name, params, ret, body, location } => {
                let param_types: Vec<(String, Type)> = params
                    .iter()
                    .map(|p| (p.name.clone(), type_from_cst(&p.ty).unwrap_or_else(Type::any)))
                    .collect();
                let return_type = type_from_cst(ret).unwrap_or_else(Type::any);
                let ty = function_type(&param_types.iter().map(|(_, t)| t.clone()).collect::<Vec<_>>(), return_type.clone());

                let closure = ClosureId(self.functions.len());
                self.functions.push(FunctionDef {
                    name: name.clone(),
                    params: param_types.clone(),
                    return_type: return_type.clone(),
                    body: Rc::new(Node::Block(Vec::new(), location.clone())),
                    location: location.clone(),
                });

                if let Err(DuplicateName(n)) = self.table.add(name, Flavour::Function, ty, ()) {
                    self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                }

                self.table.push();
                for (pname, pty) in &param_types {
                    if let Err(DuplicateName(n)) = self.table.add(pname, Flavour::Argument, pty.clone(), ()) {
                        self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                    }
                }
                self.return_stack.push(return_type.clone());
                let (body_node, _) = self.resolve(body);
                self.return_stack.pop();
                self.table.pop();

                self.functions[closure.0] = FunctionDef {
                    name: name.clone(),
                    params: param_types,
                    return_type,
                    body: Rc::new(body_node),
                    location: location.clone(),
                };

                (Node::FuncDecl { name: name.clone(), closure, location: location.clone() }, Type::void())
            }

            Ast::Assign { target, op, value, location } => {
                let (target_node, target_ty, mutable) = self.resolve_target(target);
                let (value_node, value_ty) = self.resolve(value);
                if !mutable {
                    self.emit(
                        LinkerError::AssignmentToImmutable(target_description(target)),
                        location.clone(),
                    );
                }
                match assign_op_to_binary(*op) {
                    None => {
                        if matches!(target, Target::Variable(..)) && target_ty.compatible_type(&value_ty).is_empty() {
                            self.emit(
                                LinkerError::IncompatibleType {
                                    expected: target_ty.to_string(),
                                    found: value_ty.to_string(),
                                },
                                location.clone(),
                            );
                        }
                    }
                    Some(binop) => {
                        if matches!(target, Target::Variable(..)) && target_ty.binary(binop, &value_ty).is_none() {
                            self.emit(
                                LinkerError::Custom(format!(
                                    "Operator '{op}' is not defined for '{target_ty}' and '{value_ty}'",
                                    op = assign_op_symbol(*op)
                                )),
                                location.clone(),
                            );
                        }
                    }
                }
                (Node::Assign(target_node, *op, Box::new(value_node), location.clone()), Type::void())
            }

            Ast::Nudge { target, op, location } => {
                let (target_node, target_ty, mutable) = self.resolve_target(target);
                if !mutable {
                    self.emit(
                        LinkerError::AssignmentToImmutable(target_description(target)),
                        location.clone(),
                    );
                }
                if matches!(target, Target::Variable(..))
                    && target_ty.tags != Type::int().tags
                    && target_ty.tags != Type::float().tags
                {
                    self.emit(
                        LinkerError::Custom(format!("'++'/'--' require int or float, found '{target_ty}'")),
                        location.clone(),
                    );
                }
                (Node::Nudge(target_node, *op, location.clone()), Type::void())
            }

            Ast::Block(statements, loc) => {
                self.table.push();
                let nodes: Vec<Node> = statements.iter().map(|s| self.resolve(s).0).collect();
                self.table.pop();
                (Node::Block(nodes, loc.clone()), Type::void())
            }

            Ast::Module(statements, loc) => {
                let nodes: Vec<Node> = statements.iter().map(|s| self.resolve(s).0).collect();
                (Node::Module(nodes, loc.clone()), Type::void())
            }

            Ast::If { cond, then_branch, else_branch, location } => {
                let (cond_node, cond_ty) = self.resolve(cond);
                if cond_ty.tags != Type::bool().tags {
                    self.emit(
                        LinkerError::Custom(format!("if condition must be bool, found '{cond_ty}'")),
                        location.clone(),
                    );
                }
                let (then_node, _) = self.resolve(then_branch);
                let else_node = else_branch.as_ref().map(|e| Box::new(self.resolve(e).0));
                (
                    Node::If {
                        cond: Box::new(cond_node),
                        then_branch: Box::new(then_node),
                        else_branch: else_node,
                        location: location.clone(),
                    },
                    Type::void(),
                )
            }

            Ast::IfGuard { ty, name, source, then_branch, else_branch, location } => {
                let (source_node, source_ty) = self.resolve(source);
                let guard_ty = inferred_type(ty, &source_ty);
                self.table.push();
                if let Err(DuplicateName(n)) = self.table.add(name, Flavour::Guard, guard_ty.clone(), ()) {
                    self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                }
                let (then_node, _) = self.resolve(then_branch);
                self.table.pop();
                let else_node = else_branch.as_ref().map(|e| Box::new(self.resolve(e).0));
                (
                    Node::IfGuard {
                        name: name.clone(),
                        ty: guard_ty,
                        source: Box::new(source_node),
                        then_branch: Box::new(then_node),
                        else_branch: else_node,
                        location: location.clone(),
                    },
                    Type::void(),
                )
            }

            Ast::For { init, cond, advance, body, location } => {
                self.table.push();
                let init_node = init.as_ref().map(|i| Box::new(self.resolve(i).0));
                let cond_node = cond.as_ref().map(|c| {
                    let (n, t) = self.resolve(c);
                    if t.tags != Type::bool().tags {
                        self.emit(
                            LinkerError::Custom(format!("for condition must be bool, found '{t}'")),
                            location.clone(),
                        );
                    }
                    Box::new(n)
                });
                let advance_node = advance.as_ref().map(|a| Box::new(self.resolve(a).0));
                let (body_node, _) = self.resolve(body);
                self.table.pop();
                (
                    Node::For {
                        init: init_node,
                        cond: cond_node,
                        advance: advance_node,
                        body: Box::new(body_node),
                        location: location.clone(),
                    },
                    Type::void(),
                )
            }

            Ast::Foreach { ty, name, source, body, location } => {
                let (source_node, source_ty) = self.resolve(source);
                let element_ty = source_ty.get_iterables().unwrap_or_else(|| {
                    self.emit(
                        LinkerError::Custom(format!("Type '{source_ty}' is not iterable")),
                        location.clone(),
                    );
                    Type::any()
                });
                let final_ty = inferred_type(ty, &element_ty);
                self.table.push();
                if let Err(DuplicateName(n)) = self.table.add(name, Flavour::Variable, final_ty.clone(), ()) {
                    self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                }
                let (body_node, _) = self.resolve(body);
                self.table.pop();
                (
                    Node::Foreach {
                        name: name.clone(),
                        ty: final_ty,
                        source: Box::new(source_node),
                        body: Box::new(body_node),
                        location: location.clone(),
                    },
                    Type::void(),
                )
            }

            Ast::While { cond, body, location } => {
                let (cond_node, cond_ty) = self.resolve(cond);
                if cond_ty.tags != Type::bool().tags {
                    self.emit(
                        LinkerError::Custom(format!("while condition must be bool, found '{cond_ty}'")),
                        location.clone(),
                    );
                }
                let (body_node, _) = self.resolve(body);
                (Node::While { cond: Box::new(cond_node), body: Box::new(body_node), location: location.clone() }, Type::void())
            }

            Ast::WhileGuard { ty, name, source, body, location } => {
                let (source_node, source_ty) = self.resolve(source);
                let guard_ty = inferred_type(ty, &source_ty);
                self.table.push();
                if let Err(DuplicateName(n)) = self.table.add(name, Flavour::Guard, guard_ty.clone(), ()) {
                    self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                }
                let (body_node, _) = self.resolve(body);
                self.table.pop();
                (
                    Node::WhileGuard {
                        name: name.clone(),
                        ty: guard_ty,
                        source: Box::new(source_node),
                        body: Box::new(body_node),
                        location: location.clone(),
                    },
                    Type::void(),
                )
            }

            Ast::Return(value, loc) => {
                let value_node = value.as_ref().map(|v| {
                    let (node, ty) = self.resolve(v);
                    if let Some(expected) = self.return_stack.last() {
                        if expected.compatible_type(&ty).is_empty() {
                            self.emit(
                                LinkerError::IncompatibleType { expected: expected.to_string(), found: ty.to_string() },
                                loc.clone(),
                            );
                        }
                    }
                    Box::new(node)
                });
                (Node::Return(value_node, loc.clone()), Type::void())
            }

            Ast::Try { try_block, catches, finally_block, location } => {
                let (try_node, _) = self.resolve(try_block);
                let resolved_catches: Vec<(String, Type, Node)> = catches
                    .iter()
                    .map(|(ty, name, body)| {
                        let catch_ty = type_from_cst(ty).unwrap_or_else(|| {
                            self.emit(
                                LinkerError::InvalidGuardType(format!("{ty:?}")),
                                location.clone(),
                            );
                            Type::any()
                        });
                        self.table.push();
                        if let Err(DuplicateName(n)) =
                            self.table.add(name, Flavour::Exception, catch_ty.clone(), ())
                        {
                            self.emit(LinkerError::DuplicateDefinition(n), location.clone());
                        }
                        let (body_node, _) = self.resolve(body);
                        self.table.pop();
                        (name.clone(), catch_ty, body_node)
                    })
                    .collect();
                let finally_node = finally_block.as_ref().map(|f| Box::new(self.resolve(f).0));
                (
                    Node::Try {
                        try_block: Box::new(try_node),
                        catches: resolved_catches,
                        finally_block: finally_node,
                        location: location.clone(),
                    },
                    Type::void(),
                )
            }
        }
    }

    /// Resolves an assignment/nudge target, reporting `(node, current type,
    /// is mutable)`. Property/index targets are always reported mutable —
    /// their owning `Proxy` decides at runtime (§4.3).
    fn resolve_target(&mut self, target: &Target) -> (TargetNode, Type, bool) {
        match target {
            Target::Variable(name, loc) => match self.table.find(name) {
                Some(entry) => {
                    (TargetNode::Variable(name.clone(), loc.clone()), entry.ty.clone(), entry.flavour.is_mutable())
                }
                None => {
                    self.emit(LinkerError::UndefinedIdentifier(name.clone()), loc.clone());
                    (TargetNode::Variable(name.clone(), loc.clone()), Type::any(), true)
                }
            },
            Target::Property(base, name, loc) => {
                let (base_node, _) = self.resolve(base);
                (TargetNode::Property(Box::new(base_node), name.clone(), loc.clone()), Type::anyq(), true)
            }
            Target::Index(base, index, loc) => {
                let (base_node, _) = self.resolve(base);
                let (index_node, _) = self.resolve(index);
                (TargetNode::Index(Box::new(base_node), Box::new(index_node), loc.clone()), Type::anyq(), true)
            }
        }
    }
}

fn target_description(target: &Target) -> String {
    match target {
        Target::Variable(name, _) => name.clone(),
        Target::Property(_, name, _) => name.clone(),
        Target::Index(..) => "[…]".to_string(),
    }
}

fn assign_op_symbol(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
        AssignOp::RemAssign => "%=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg_parser::Parser;

    fn link_source(text: &str) -> Result<Program, Vec<String>> {
        let cst = Parser::from_str(Rc::from("test.egg"), text).unwrap().parse_module().unwrap();
        let ast = egg_ast::lower(&cst).unwrap();
        let handler = Handler::new();
        let result = Linker::new(&handler).with_module(Rc::from("test.egg"), ast).link();
        result.map_err(|()| handler.diagnostics().iter().map(|d| d.message.to_string()).collect())
    }

    #[test]
    fn undefined_identifier_is_reported() {
        let err = link_source("print(x);").unwrap_err();
        assert!(err.iter().any(|m| m.contains("Undefined identifier")));
    }

    #[test]
    fn well_typed_module_links_cleanly() {
        assert!(link_source("int x = 1; print(x);").is_ok());
    }

    #[test]
    fn var_decl_rejects_incompatible_initializer() {
        let err = link_source("bool b = 1;").unwrap_err();
        assert!(err.iter().any(|m| m.contains("not compatible")));
    }

    #[test]
    fn recursive_function_resolves_its_own_name() {
        let program = link_source("int f(int n) { return f(n); }").unwrap();
        assert_eq!(program.functions.len(), 1);
    }

    #[test]
    fn assigning_to_a_function_name_is_rejected() {
        let err = link_source("void f() {} f = 1;").unwrap_err();
        assert!(err.iter().any(|m| m.contains("not mutable")));
    }

    #[test]
    fn foreach_over_a_string_yields_string_elements() {
        assert!(link_source(r#"foreach (var c in "hi") { print(c); }"#).is_ok());
    }

    #[test]
    fn array_literal_rejects_a_statically_void_element() {
        let err = link_source("void noop() {} var a = [noop()];").unwrap_err();
        assert!(err.iter().any(|m| m.contains("Void cannot be used")));
    }

    #[test]
    fn object_literal_rejects_a_statically_void_element() {
        let err = link_source("void noop() {} var o = { x: noop() };").unwrap_err();
        assert!(err.iter().any(|m| m.contains("Void cannot be used")));
    }
}
