use egg_ast::{AssignOp, BinaryOp, ClosureId, NudgeOp, ObjectKey, Type, UnaryOp, Value};
use egg_span::Location;

/// A left-hand side shape resolved by the Linker (§4.2 *Target*, §4.7
/// "Target nodes"): a variable name, or a property/index read reused as a
/// write target.
#[derive(Clone, Debug)]
pub enum TargetNode {
    Variable(String, Location),
    Property(Box<Node>, String, Location),
    Index(Box<Node>, Box<Node>, Location),
}

impl TargetNode {
    pub fn location(&self) -> &Location {
        match self {
            TargetNode::Variable(_, l) => l,
            TargetNode::Property(_, _, l) => l,
            TargetNode::Index(_, _, l) => l,
        }
    }
}

/// The runtime node tree built by the Linker (§4.7). A tagged variant
/// rather than per-kind trait objects, per the explicit dispatch-polymorphism
/// guidance for `Node`/`Proxy` (§9): a fixed set of concrete shapes, no
/// open-world inheritance.
#[derive(Clone, Debug)]
pub enum Node {
    IntLit(num_bigint::BigInt, Location),
    FloatLit(f64, Location),
    StringLit(std::rc::Rc<Vec<char>>, Location),
    NullLit(Location),
    BoolLit(bool, Location),
    ArrayLit(Vec<Node>, Location),
    ObjectLit(Vec<(ObjectKey, Node)>, Location),

    VariableGet(String, Location),
    PropertyGet(Box<Node>, String, Location),
    IndexGet(Box<Node>, Box<Node>, Location),
    Call(Box<Node>, Vec<Node>, Location),

    Unary(UnaryOp, Box<Node>, Location),
    Binary(BinaryOp, Box<Node>, Box<Node>, Location),
    Ternary(Box<Node>, Box<Node>, Box<Node>, Location),

    Assign(TargetNode, AssignOp, Box<Node>, Location),
    Nudge(TargetNode, NudgeOp, Location),

    ExprStatement(Box<Node>, Location),
    Assert(Box<Node>, Location),
    VarDecl { name: String, ty: Type, init: Box<Node>, location: Location },
    FuncDecl { name: String, closure: ClosureId, location: Location },

    Block(Vec<Node>, Location),
    Module(Vec<Node>, Location),
    If { cond: Box<Node>, then_branch: Box<Node>, else_branch: Option<Box<Node>>, location: Location },
    IfGuard { name: String, ty: Type, source: Box<Node>, then_branch: Box<Node>, else_branch: Option<Box<Node>>, location: Location },
    For { init: Option<Box<Node>>, cond: Option<Box<Node>>, advance: Option<Box<Node>>, body: Box<Node>, location: Location },
    Foreach { name: String, ty: Type, source: Box<Node>, body: Box<Node>, location: Location },
    While { cond: Box<Node>, body: Box<Node>, location: Location },
    WhileGuard { name: String, ty: Type, source: Box<Node>, body: Box<Node>, location: Location },
    Return(Option<Box<Node>>, Location),
    Try { try_block: Box<Node>, catches: Vec<(String, Type, Node)>, finally_block: Option<Box<Node>>, location: Location },
}

impl Node {
    pub fn location(&self) -> &Location {
        use Node::*;
        match self {
            IntLit(_, l) | FloatLit(_, l) | StringLit(_, l) | NullLit(l) | BoolLit(_, l) => l,
            ArrayLit(_, l) | ObjectLit(_, l) => l,
            VariableGet(_, l) | PropertyGet(_, _, l) | IndexGet(_, _, l) | Call(_, _, l) => l,
            Unary(_, _, l) | Binary(_, _, _, l) | Ternary(_, _, _, l) => l,
            Assign(_, _, _, l) | Nudge(_, _, l) => l,
            ExprStatement(_, l) | Assert(_, l) => l,
            VarDecl { location, .. } | FuncDecl { location, .. } => location,
            Block(_, l) | Module(_, l) => l,
            If { location, .. } | IfGuard { location, .. } => location,
            For { location, .. } | Foreach { location, .. } => location,
            While { location, .. } | WhileGuard { location, .. } => location,
            Return(_, l) => l,
            Try { location, .. } => location,
        }
    }
}

/// The propagation mode a statement's `execute` leaves behind (§4.7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Through,
    Break,
    Continue,
    Return,
}

/// `(flow, value)` (§4.7, GLOSSARY "Outcome"). `value` is only meaningful
/// for `Return`.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub flow: Flow,
    pub value: Value,
}

impl Outcome {
    pub fn through() -> Self {
        Outcome { flow: Flow::Through, value: Value::Void }
    }
    pub fn brk() -> Self {
        Outcome { flow: Flow::Break, value: Value::Void }
    }
    pub fn cont() -> Self {
        Outcome { flow: Flow::Continue, value: Value::Void }
    }
    pub fn ret(value: Value) -> Self {
        Outcome { flow: Flow::Return, value }
    }
    pub fn is_through(&self) -> bool {
        self.flow == Flow::Through
    }
}
