use crate::node::Node;
use crate::tree_walker::TreeWalker;
use egg_ast::Type;
use egg_errors::{Logger, RuntimeError, StageError};
use egg_span::{Location, SourceName};
use std::rc::Rc;

/// A user-defined function's signature and body, keyed by the `ClosureId`
/// the Linker mints for it (§4.7 `FuncDecl`). `params` pairs each
/// parameter's name with its resolved type for argument binding at call
/// time; arity/type checking against these happens in `TreeWalker::call_closure`.
/// `body` is `Rc`-wrapped so a call doesn't have to deep-clone the function's
/// tree just to get an owned reference past the borrow checker.
#[derive(Clone, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<(String, Type)>,
    pub return_type: Type,
    pub body: Rc<Node>,
    pub location: Location,
}

/// One linked source file: its name in the `SourceMap` and its resolved
/// module root (§4.7 `Module`). §9 defers multi-module linking (imports)
/// as out of scope; `Program` still keeps modules in a `Vec` so that
/// shape is ready to grow into without a later breaking change.
#[derive(Clone, Debug)]
pub struct Module {
    pub source: SourceName,
    pub root: Node,
}

/// The output of the Linker (§4.7): every function body linked, every
/// module resolved, ready for `TreeWalker::run`.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub modules: Vec<Module>,
    pub functions: Vec<FunctionDef>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every linked module in source order against one shared
    /// `TreeWalker`/symbol table (§6 "Program.run(logger)" is the whole
    /// external interface the CLI and test harness drive). §9 defers real
    /// multi-module semantics (imports between modules); today there's
    /// exactly one, so the first module's name stands in as the walker's
    /// "current source" for locations raised before any node is visited.
    ///
    /// An unhandled `RuntimeError` "surfaces to `Program.run` as a fatal
    /// error reported to the logger" (§5): before returning it, `run` logs
    /// it as a diagnostic at the node that first observed it, so callers
    /// (the CLI, the test harness) see it in the same log stream as every
    /// other emitted entry rather than having to special-case the `Err`.
    pub fn run(&self, logger: &mut dyn Logger) -> Result<(), RuntimeError> {
        let source = self.modules.first().map(|m| m.source.clone()).unwrap_or_else(|| Rc::from(""));
        let failure = {
            let mut walker = TreeWalker::new(&self.functions, logger, source);
            let mut failure = None;
            for module in &self.modules {
                if let Err(error) = walker.run_module(&module.root) {
                    failure = Some((error, walker.error_location()));
                    break;
                }
            }
            failure
        };
        match failure {
            Some((error, location)) => {
                logger.log(error.clone().at(location));
                Err(error)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg_errors::VecLogger;

    #[test]
    fn run_drives_every_linked_module_in_order() {
        let cst = egg_parser::Parser::from_str(Rc::from("t.egg"), r#"print("hi");"#).unwrap().parse_module().unwrap();
        let ast = egg_ast::lower(&cst).unwrap();
        let handler = egg_errors::Handler::new();
        let program = egg_passes::Linker::new(&handler).with_module(Rc::from("t.egg"), ast).link().unwrap();
        let mut logger = VecLogger::new();
        assert!(program.run(&mut logger).is_ok());
        assert_eq!(logger.entries.len(), 1);
        assert_eq!(logger.entries[0].message.to_string(), "hi");
    }
}
