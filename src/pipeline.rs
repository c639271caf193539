use egg_errors::{Handler, Logger, StageError};
use egg_span::SourceMap;

/// Drives one source all the way from text to a finished (or failed) run,
/// logging whatever each stage reports along the way (§6 "Tokenizer.fromString
/// → Parser.fromString/.parse → Linker.withModule().link() → Program.run").
/// Tokenizer/Parser/lowering/Linker errors are each fatal to their own stage
/// (§7); `Program::run` has already logged an uncaught runtime error itself
/// before returning it. Returns whether the run completed without logging
/// anything at [`egg_errors::Severity::Error`] or worse.
pub fn run_source(name: &str, source: &str, logger: &mut dyn Logger) -> bool {
    let source_map = SourceMap::new();
    let source_name = source_map.add(name, source);

    let mut parser = match egg_parser::Parser::from_str(source_name.clone(), source) {
        Ok(parser) => parser,
        Err((error, location)) => {
            logger.log(error.at(location));
            return false;
        }
    };

    let cst = match parser.parse_module() {
        Ok(cst) => cst,
        Err((error, location)) => {
            logger.log(error.at(location));
            return false;
        }
    };

    let ast = match egg_ast::lower(&cst) {
        Ok(ast) => ast,
        Err((error, location)) => {
            logger.log(error.at(location));
            return false;
        }
    };

    let handler = Handler::new();
    let program = match egg_passes::Linker::new(&handler).with_module(source_name, ast).link() {
        Ok(program) => program,
        Err(()) => {
            for diagnostic in handler.into_diagnostics() {
                logger.log(diagnostic);
            }
            return false;
        }
    };

    program.run(logger).is_ok()
}

/// `egg tokens FILE` (§3 "CLI surface"): a debug dump of the token stream,
/// one line per non-trivia token, skipping whitespace and comments.
pub fn dump_tokens(name: &str, source: &str) -> Result<Vec<String>, String> {
    let source_name: std::rc::Rc<str> = std::rc::Rc::from(name);
    let tokens = egg_lexer::Tokenizer::from_str(source_name, source)
        .tokenize()
        .map_err(|(error, location)| format!("{}: {error}", location))?;

    Ok(tokens
        .into_iter()
        .filter(|t| !t.is_trivia())
        .map(|t| format!("{}:{} {} {:?}", t.line, t.column, t.kind(), t.raw))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg_errors::VecLogger;

    #[test]
    fn runs_a_well_formed_script() {
        let mut logger = VecLogger::new();
        assert!(run_source("t.egg", r#"print("hi");"#, &mut logger));
        assert_eq!(logger.entries.len(), 1);
    }

    #[test]
    fn reports_a_parse_error_without_running() {
        let mut logger = VecLogger::new();
        assert!(!run_source("t.egg", "print(", &mut logger));
        assert_eq!(logger.entries.len(), 1);
    }

    #[test]
    fn reports_an_uncaught_runtime_error() {
        let mut logger = VecLogger::new();
        assert!(!run_source("t.egg", "int x = 1 / 0;", &mut logger));
        assert_eq!(logger.entries.len(), 1);
    }

    #[test]
    fn dump_tokens_skips_trivia() {
        let lines = dump_tokens("t.egg", "int x = 1; // comment\n").unwrap();
        assert!(lines.iter().all(|l| !l.contains("comment")));
        assert!(lines.iter().any(|l| l.contains("\"int\"") || l.contains("int")));
    }
}
