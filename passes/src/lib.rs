//! The scoped [`SymbolTable`](egg_ast::SymbolTable) instantiated over static
//! types, and the Linker/Resolver (§4.5, §4.6): Ast to a resolved runtime
//! node graph.

mod linker;

pub use linker::Linker;
