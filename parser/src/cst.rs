use egg_span::Location;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if *self == UnaryOp::Neg { "-" } else { "!" })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;
        let s = match self {
            Eq => "==",
            NotEq => "!=",
            Lt => "<",
            LtEq => "<=",
            Gt => ">",
            GtEq => ">=",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Rem => "%",
            And => "&&",
            Or => "||",
        };
        write!(f, "{s}")
    }
}

/// Compound-assignment and plain-assignment operators share a target shape
/// (§4.2 *Target*); `Assign` is `=`, the rest desugar to `binary(op, …)` at
/// the runtime's `modify` entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NudgeOp {
    Increment,
    Decrement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeBase {
    Void,
    Bool,
    Int,
    Float,
    String,
    Object,
    Any,
    Var,
}

/// A type written in source (§4.2 *Type*): a primitive, `var`, or either with
/// a nullable `?` suffix.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCst {
    pub base: TypeBase,
    pub nullable: bool,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub ty: TypeCst,
    pub name: String,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub ty: TypeCst,
    pub name: String,
    pub body: Box<Cst>,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKey {
    Ident(String),
    String(String),
}

/// The concrete syntax tree produced by the Parser (§4.2). Deliberately
/// permissive about assignment-target and expression-statement shape; those
/// legality checks belong to syntax lowering, not here.
#[derive(Clone, Debug, PartialEq)]
pub enum Cst {
    IntLit(String, Location),
    FloatLit(String, Location),
    StringLit(String, Location),
    Null(Location),
    True(Location),
    False(Location),
    Ident(String, Location),
    ArrayLit(Vec<Cst>, Location),
    ObjectLit(Vec<(ObjectKey, Cst)>, Location),

    Property(Box<Cst>, String, Location),
    Index(Box<Cst>, Box<Cst>, Location),
    Call(Box<Cst>, Vec<Cst>, Location),

    Unary(UnaryOp, Box<Cst>, Location),
    Binary(BinaryOp, Box<Cst>, Box<Cst>, Location),
    Ternary(Box<Cst>, Box<Cst>, Box<Cst>, Location),

    ExprStatement(Box<Cst>, Location),
    Assert(Box<Cst>, Location),
    VarDecl { ty: TypeCst, name: String, init: Box<Cst>, location: Location },
    FuncDecl { name: String, params: Vec<Param>, ret: TypeCst, body: Box<Cst>, location: Location },
    Assign { target: Box<Cst>, op: AssignOp, value: Box<Cst>, location: Location },
    Nudge { target: Box<Cst>, op: NudgeOp, location: Location },

    If { cond: Box<Cst>, then_branch: Box<Cst>, else_branch: Option<Box<Cst>>, location: Location },
    IfGuard { ty: TypeCst, name: String, source: Box<Cst>, then_branch: Box<Cst>, else_branch: Option<Box<Cst>>, location: Location },
    For { init: Option<Box<Cst>>, cond: Option<Box<Cst>>, advance: Option<Box<Cst>>, body: Box<Cst>, location: Location },
    Foreach { ty: TypeCst, name: String, source: Box<Cst>, body: Box<Cst>, location: Location },
    While { cond: Box<Cst>, body: Box<Cst>, location: Location },
    WhileGuard { ty: TypeCst, name: String, source: Box<Cst>, body: Box<Cst>, location: Location },
    Return(Option<Box<Cst>>, Location),
    Try { try_block: Box<Cst>, catches: Vec<CatchClause>, finally_block: Option<Box<Cst>>, location: Location },

    Block(Vec<Cst>, Location),
    Module(Vec<Cst>, Location),
}

impl Cst {
    pub fn location(&self) -> &Location {
        use Cst::*;
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
