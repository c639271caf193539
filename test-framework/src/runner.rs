use std::rc::Rc;

use egg_errors::{Handler, Severity, StageError, VecLogger};
use egg_span::SourceMap;

use crate::directive::{parse_directives, Directive};
use crate::error::{TestFailure, TestResult};

/// Runs one egg script end to end (Tokenizer → Parser → lowering → Linker →
/// `Program::run`) and checks its embedded `///>`/`///<` directives against
/// the logger's entries in order (§6, §8). `name` is the synthetic source
/// name the script is registered under; directive text that names it is
/// compared after substituting [`egg_span::RESOURCE_PLACEHOLDER`] for it, so
/// fixtures stay independent of wherever the caller loaded them from.
pub fn run_script(name: &str, source: &str) -> TestResult<()> {
    let directives = parse_directives(source);

    let source_map = SourceMap::new();
    let source_name = source_map.add(name, source);

    let cst = egg_parser::Parser::from_str(source_name.clone(), source)
        .map_err(|(e, loc)| TestFailure::Tokenizer(e.at(loc).render_plain()))?
        .parse_module()
        .map_err(|(e, loc)| TestFailure::Parser(e.at(loc).render_plain()))?;

    let ast = egg_ast::lower(&cst).map_err(|(e, loc)| TestFailure::Lowering(e.at(loc).render_plain()))?;

    let handler = Handler::new();
    let program = egg_passes::Linker::new(&handler)
        .with_module(source_name.clone(), ast)
        .link()
        .map_err(|()| {
            let rendered =
                handler.diagnostics().iter().map(|d| d.render_plain()).collect::<Vec<_>>().join("\n");
            TestFailure::Linker(rendered)
        })?;

    let mut logger = VecLogger::new();
    let _ = program.run(&mut logger);

    let normalize = |text: String| -> String { source_map.normalize(&source_name, &text) };

    let mut entries = logger.entries.into_iter();
    for (index, directive) in directives.into_iter().enumerate() {
        let entry = entries.next().ok_or_else(|| TestFailure::LogEndedEarly {
            index,
            expected: match &directive {
                Directive::Print(text) => text.clone(),
                Directive::NonPrint(text) => format!("<{text}"),
            },
        })?;

        match directive {
            Directive::Print(expected) => {
                if entry.severity != Severity::Print {
                    return Err(TestFailure::ExpectedPrint { index, found: entry.render_tagged() });
                }
                let found = normalize(entry.message.to_string());
                if found != expected {
                    return Err(TestFailure::PrintMismatch { index, expected, found });
                }
            }
            Directive::NonPrint(rest) => {
                if entry.severity == Severity::Print {
                    return Err(TestFailure::ExpectedNonPrint { index, found: entry.message.to_string() });
                }
                let expected = format!("<{rest}");
                let found = normalize(entry.render_tagged());
                if found != expected {
                    return Err(TestFailure::NonPrintMismatch { index, expected, found });
                }
            }
        }
    }

    if let Some(extra) = entries.next() {
        return Err(TestFailure::ExtraLogEntry(normalize(extra.render_tagged())));
    }

    Ok(())
}

/// Convenience for callers that already have a [`Rc<str>`] source name
/// (the CLI's loader does, from its own `SourceMap`) instead of a `&str`.
pub fn run_script_named(name: Rc<str>, source: &str) -> TestResult<()> {
    run_script(&name, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_print_directive_passes() {
        let result = run_script("t.egg", "print(\"hello, world\"); ///>hello, world\n");
        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn mismatched_print_directive_fails() {
        let result = run_script("t.egg", "print(\"hello\"); ///>goodbye\n");
        assert!(matches!(result, Err(TestFailure::PrintMismatch { .. })));
    }

    #[test]
    fn missing_entry_for_a_directive_fails() {
        let result = run_script("t.egg", "int x = 1; ///>never printed\n");
        assert!(matches!(result, Err(TestFailure::LogEndedEarly { .. })));
    }

    #[test]
    fn extra_unmatched_print_fails() {
        let result = run_script("t.egg", "print(\"a\"); print(\"b\");\n");
        assert!(matches!(result, Err(TestFailure::ExtraLogEntry(_))));
    }

    #[test]
    fn non_print_directive_matches_uncaught_runtime_error() {
        // "1 / 0" starts at column 9 (after "int x = ") and ends at column
        // 13 (after "0"); same-line ranges render as `(line,c1-c2)`. The
        // source name is normalized to `<RESOURCE>` on both directive kinds
        // before comparison (§6), not just `///>` ones.
        let source = "int x = 1 / 0; ///<Runtime><Error><RESOURCE>(1,9-13): Division by zero\n";
        let result = run_script("t.egg", source);
        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn resource_placeholder_substitutes_the_source_name() {
        let source =
            "print(\"hi\"); ///>hi\nint x = 1 / 0; ///<Runtime><Error><RESOURCE>(2,9-13): Division by zero\n";
        let result = run_script("fixture.egg", source);
        assert!(result.is_ok(), "{result:?}");
    }
}
