//! The egg tree-walking runtime (§4.7): the `Node` kind the Linker builds,
//! the concrete `Proxy` implementers every value is made of, and the
//! `TreeWalker` that drives execution and implements `egg_ast::Runner`.

mod globals;
mod node;
mod ops;
pub mod proxies;
mod program;
mod string_ops;
mod tree_walker;

pub use globals::{global_types, install_globals};
pub use node::{Flow, Node, Outcome, TargetNode};
pub use program::{FunctionDef, Module, Program};
pub use tree_walker::TreeWalker;
