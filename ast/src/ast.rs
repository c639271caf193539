use egg_errors::SyntaxError;
use egg_parser::{CatchClause, Cst, ObjectKey, Param, TypeCst};
pub use egg_parser::{AssignOp, BinaryOp, NudgeOp, UnaryOp};
use egg_span::Location;

/// An assignable shape (§4.2 *Target*): the only three legal left-hand
/// sides of `=`, a compound operator, or a nudge.
#[derive(Clone, Debug)]
pub enum Target {
    Variable(String, Location),
    Property(Box<Ast>, String, Location),
    Index(Box<Ast>, Box<Ast>, Location),
}

impl Target {
    pub fn location(&self) -> &Location {
        match self {
            Target::Variable(_, l) => l,
            Target::Property(_, _, l) => l,
            Target::Index(_, _, l) => l,
        }
    }
}

/// The abstract syntax tree (§2, §4.2): the parse tree normalised onto a
/// fixed kind set. Unlike [`Cst`], every `Assign`/`Nudge` target is one of
/// the three legal [`Target`] shapes and every `ExprStatement` wraps a call —
/// both enforced by [`lower`], not by the parser.
#[derive(Clone, Debug)]
pub enum Ast {
    IntLit(String, Location),
    FloatLit(String, Location),
    StringLit(String, Location),
    Null(Location),
    True(Location),
    False(Location),
    Ident(String, Location),
    ArrayLit(Vec<Ast>, Location),
    ObjectLit(Vec<(ObjectKey, Ast)>, Location),

    Property(Box<Ast>, String, Location),
    Index(Box<Ast>, Box<Ast>, Location),
    Call(Box<Ast>, Vec<Ast>, Location),

    Unary(UnaryOp, Box<Ast>, Location),
    Binary(BinaryOp, Box<Ast>, Box<Ast>, Location),
    Ternary(Box<Ast>, Box<Ast>, Box<Ast>, Location),

    ExprStatement(Box<Ast>, Location),
    Assert(Box<Ast>, Location),
    VarDecl { ty: TypeCst, name: String, init: Box<Ast>, location: Location },
    FuncDecl { name: String, params: Vec<Param>, ret: TypeCst, body: Box<Ast>, location: Location },
    Assign { target: Target, op: AssignOp, value: Box<Ast>, location: Location },
    Nudge { target: Target, op: NudgeOp, location: Location },

    If { cond: Box<Ast>, then_branch: Box<Ast>, else_branch: Option<Box<Ast>>, location: Location },
    IfGuard { ty: TypeCst, name: String, source: Box<Ast>, then_branch: Box<Ast>, else_branch: Option<Box<Ast>>, location: Location },
    For { init: Option<Box<Ast>>, cond: Option<Box<Ast>>, advance: Option<Box<Ast>>, body: Box<Ast>, location: Location },
    Foreach { ty: TypeCst, name: String, source: Box<Ast>, body: Box<Ast>, location: Location },
    While { cond: Box<Ast>, body: Box<Ast>, location: Location },
    WhileGuard { ty: TypeCst, name: String, source: Box<Ast>, body: Box<Ast>, location: Location },
    Return(Option<Box<Ast>>, Location),
    Try { try_block: Box<Ast>, catches: Vec<(TypeCst, String, Ast)>, finally_block: Option<Box<Ast>>, location: Location },

    Block(Vec<Ast>, Location),
    Module(Vec<Ast>, Location),
}

impl Ast {
    pub fn location(&self) -> &Location {
        use Ast::*;
        match self {
            IntLit(_, l) | FloatLit(_, l) | StringLit(_, l) | Null(l) | True(l) | False(l) | Ident(_, l) => l,
            ArrayLit(_, l) | ObjectLit(_, l) => l,
            Property(_, _, l) | Index(_, _, l) | Call(_, _, l) => l,
            Unary(_, _, l) | Binary(_, _, _, l) | Ternary(_, _, _, l) => l,
            ExprStatement(_, l) | Assert(_, l) => l,
            VarDecl { location, .. } | FuncDecl { location, .. } => location,
            Assign { location, .. } | Nudge { location, .. } => location,
            If { location, .. } | IfGuard { location, .. } => location,
            For { location, .. } | Foreach { location, .. } => location,
            While { location, .. } | WhileGuard { location, .. } => location,
            Return(_, l) => l,
            Try { location, .. } => location,
            Block(_, l) | Module(_, l) => l,
        }
    }
}

type SResult<T> = Result<T, (SyntaxError, Location)>;

/// Lowers a parse tree onto the fixed AST kind set (§2, §4.2), validating
/// assignment-target and expression-statement legality along the way.
pub fn lower(cst: &Cst) -> SResult<Ast> {
    Ok(match cst {
        Cst::IntLit(s, l) => Ast::IntLit(s.clone(), l.clone()),
        Cst::FloatLit(s, l) => Ast::FloatLit(s.clone(), l.clone()),
        Cst::StringLit(s, l) => Ast::StringLit(s.clone(), l.clone()),
        Cst::Null(l) => Ast::Null(l.clone()),
        Cst::True(l) => Ast::True(l.clone()),
        Cst::False(l) => Ast::False(l.clone()),
        Cst::Ident(name, l) => Ast::Ident(name.clone(), l.clone()),
        Cst::ArrayLit(elements, l) => {
            Ast::ArrayLit(elements.iter().map(lower).collect::<SResult<_>>()?, l.clone())
        }
        Cst::ObjectLit(entries, l) => {
            let entries = entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), lower(v)?)))
                .collect::<SResult<_>>()?;
            Ast::ObjectLit(entries, l.clone())
        }
        Cst::Property(base, name, l) => Ast::Property(Box::new(lower(base)?), name.clone(), l.clone()),
        Cst::Index(base, index, l) => Ast::Index(Box::new(lower(base)?), Box::new(lower(index)?), l.clone()),
        Cst::Call(callee, args, l) => {
            Ast::Call(Box::new(lower(callee)?), args.iter().map(lower).collect::<SResult<_>>()?, l.clone())
        }
        Cst::Unary(op, operand, l) => Ast::Unary(*op, Box::new(lower(operand)?), l.clone()),
        Cst::Binary(op, left, right, l) => Ast::Binary(*op, Box::new(lower(left)?), Box::new(lower(right)?), l.clone()),
        Cst::Ternary(cond, then_value, else_value, l) => {
            Ast::Ternary(Box::new(lower(cond)?), Box::new(lower(then_value)?), Box::new(lower(else_value)?), l.clone())
        }
        Cst::ExprStatement(expr, l) => {
            let lowered = lower(expr)?;
            if !matches!(lowered, Ast::Call(_, _, _)) {
                return Err((SyntaxError::InvalidExpressionStatement, l.clone()));
            }
            Ast::ExprStatement(Box::new(lowered), l.clone())
        }
        Cst::Assert(expr, l) => Ast::Assert(Box::new(lower(expr)?), l.clone()),
        Cst::VarDecl { ty, name, init, location } => {
            Ast::VarDecl { ty: ty.clone(), name: name.clone(), init: Box::new(lower(init)?), location: location.clone() }
        }
        Cst::FuncDecl { name, params, ret, body, location } => Ast::FuncDecl {
            name: name.clone(),
            params: params.clone(),
            ret: ret.clone(),
            body: Box::new(lower(body)?),
            location: location.clone(),
        },
        Cst::Assign { target, op, value, location } => Ast::Assign {
            target: lower_target(target)?,
            op: *op,
            value: Box::new(lower(value)?),
            location: location.clone(),
        },
        Cst::Nudge { target, op, location } => {
            Ast::Nudge { target: lower_target(target)?, op: *op, location: location.clone() }
        }
        Cst::If { cond, then_branch, else_branch, location } => Ast::If {
            cond: Box::new(lower(cond)?),
            then_branch: Box::new(lower(then_branch)?),
            else_branch: else_branch.as_deref().map(lower).transpose()?.map(Box::new),
            location: location.clone(),
        },
        Cst::IfGuard { ty, name, source, then_branch, else_branch, location } => Ast::IfGuard {
            ty: ty.clone(),
            name: name.clone(),
            source: Box::new(lower(source)?),
            then_branch: Box::new(lower(then_branch)?),
            else_branch: else_branch.as_deref().map(lower).transpose()?.map(Box::new),
            location: location.clone(),
        },
        Cst::For { init, cond, advance, body, location } => Ast::For {
            init: init.as_deref().map(lower).transpose()?.map(Box::new),
            cond: cond.as_deref().map(lower).transpose()?.map(Box::new),
            advance: advance.as_deref().map(lower).transpose()?.map(Box::new),
            body: Box::new(lower(body)?),
            location: location.clone(),
        },
        Cst::Foreach { ty, name, source, body, location } => Ast::Foreach {
            ty: ty.clone(),
            name: name.clone(),
            source: Box::new(lower(source)?),
            body: Box::new(lower(body)?),
            location: location.clone(),
        },
        Cst::While { cond, body, location } => {
            Ast::While { cond: Box::new(lower(cond)?), body: Box::new(lower(body)?), location: location.clone() }
        }
        Cst::WhileGuard { ty, name, source, body, location } => Ast::WhileGuard {
            ty: ty.clone(),
            name: name.clone(),
            source: Box::new(lower(source)?),
            body: Box::new(lower(body)?),
            location: location.clone(),
        },
        Cst::Return(value, l) => Ast::Return(value.as_deref().map(lower).transpose()?.map(Box::new), l.clone()),
        Cst::Try { try_block, catches, finally_block, location } => Ast::Try {
            try_block: Box::new(lower(try_block)?),
            catches: catches
                .iter()
                .map(|c: &CatchClause| Ok((c.ty.clone(), c.name.clone(), lower(&c.body)?)))
                .collect::<SResult<_>>()?,
            finally_block: finally_block.as_deref().map(lower).transpose()?.map(Box::new),
            location: location.clone(),
        },
        Cst::Block(statements, l) => Ast::Block(statements.iter().map(lower).collect::<SResult<_>>()?, l.clone()),
        Cst::Module(statements, l) => Ast::Module(statements.iter().map(lower).collect::<SResult<_>>()?, l.clone()),
    })
}

fn lower_target(cst: &Cst) -> SResult<Target> {
    match cst {
        Cst::Ident(name, l) => Ok(Target::Variable(name.clone(), l.clone())),
        Cst::Property(base, name, l) => Ok(Target::Property(Box::new(lower(base)?), name.clone(), l.clone())),
        Cst::Index(base, index, l) => Ok(Target::Index(Box::new(lower(base)?), Box::new(lower(index)?), l.clone())),
        other => Err((SyntaxError::InvalidAssignmentTarget, other.location().clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg_parser::Parser;
    use std::rc::Rc;

    fn lower_source(text: &str) -> SResult<Ast> {
        let cst = Parser::from_str(Rc::from("test.egg"), text).unwrap().parse_module().unwrap();
        lower(&cst)
    }

    #[test]
    fn call_expression_statement_lowers_cleanly() {
        assert!(lower_source(r#"print("hi");"#).is_ok());
    }

    #[test]
    fn bare_expression_statement_is_rejected() {
        let err = lower_source("1 + 1;").unwrap_err();
        assert_eq!(err.0, SyntaxError::InvalidExpressionStatement);
    }

    #[test]
    fn index_and_property_targets_are_legal() {
        assert!(lower_source("x.y = 1;").is_ok());
        assert!(lower_source("x[0] = 1;").is_ok());
    }
}
