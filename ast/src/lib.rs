//! The value/type model (§3, §4.4), the Proxy protocol (§4.3), and syntax
//! lowering from the parse tree onto a fixed AST kind set (§4.2).

mod ast;
mod proxy;
mod symbol_table;
mod type_;
mod value;

pub use ast::{lower, Ast, AssignOp, BinaryOp, NudgeOp, Target, UnaryOp};
pub use egg_parser::{CatchClause, ObjectKey, Param, TypeBase, TypeCst};
pub use proxy::{CanonicalKey, ClosureId, LazyValue, Proxy, PullIterator, Runner, ValueMap};
pub use symbol_table::{DuplicateName, Entry, Flavour, Isolated, SymbolTable};
pub use type_::{PrimitiveTag, Shape, Type};
pub use value::{bigint_to_f64, format_float, Value};
