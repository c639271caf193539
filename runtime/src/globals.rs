//! The fixed global bindings every egg program starts with (§4.6, §4.8):
//! `print` and the `string`/`object`/`type` manifestations. Split from
//! [`crate::tree_walker`] so the Linker can ask for the *types* of these
//! bindings without constructing live `Value`s (it never runs a program, so
//! it has no `Runner` to hand a `BuiltinFn` a closure over).

use crate::proxies::{BuiltinFn, Manifestation};
use egg_ast::{Flavour, SymbolTable, Type, Value};

/// The name and static type of every builtin the Linker seeds the root
/// scope with before resolving a module (§4.6).
pub fn global_types() -> Vec<(&'static str, Type)> {
    vec![
        ("print", Type::object()),
        ("string", Type::object()),
        ("object", Type::object()),
        ("type", Type::object()),
    ]
}

/// Populates a fresh runtime `SymbolTable<Value>` with the same names
/// `global_types` describes, bound to their actual callable values.
pub fn install_globals(table: &mut SymbolTable<Value>) {
    table.builtin(
        "print",
        Type::object(),
        BuiltinFn::new("print", |runner, args| {
            let text: String = args.iter().map(|v| v.to_string_value()).collect();
            runner.log_print(text);
            Ok(Value::Void)
        })
        .into_value(),
    );
    table.builtin("string", Type::object(), Manifestation::new("string").into_value());
    table.builtin("object", Type::object(), Manifestation::new("object").into_value());
    table.builtin("type", Type::object(), Manifestation::new("type").into_value());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_types_and_installed_values_share_names() {
        let mut table = SymbolTable::new();
        install_globals(&mut table);
        for (name, _) in global_types() {
            assert!(table.find(name).is_some(), "missing global binding for '{name}'");
        }
    }

    #[test]
    fn print_builtin_is_not_mutable() {
        let mut table = SymbolTable::new();
        install_globals(&mut table);
        assert!(!table.find("print").unwrap().flavour.is_mutable());
        assert_eq!(table.find("print").unwrap().flavour, Flavour::Builtin);
    }
}
