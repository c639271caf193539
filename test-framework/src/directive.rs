/// One expected-output assertion embedded in a script's source comments
/// (§6 "Test-harness scripts"). Directives are collected in the order their
/// source lines appear, which is also the order they're checked against the
/// logger's entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// `///>TEXT` — the next `Print` entry's rendered form must equal `TEXT`.
    Print(String),
    /// `///<TEXT` — the next non-`Print` entry's rendered form must equal
    /// `<TEXT` (the leading `<` is part of the expectation, not the marker).
    NonPrint(String),
}

const PRINT_MARKER: &str = "///>";
const NON_PRINT_MARKER: &str = "///<";

/// Scans `source` line by line for `///>`/`///<` markers, in textual order.
/// A line may carry at most one marker; text after it (to end of line) is
/// the directive's expected payload verbatim, including leading/trailing
/// whitespace.
pub fn parse_directives(source: &str) -> Vec<Directive> {
    let mut directives = Vec::new();
    for line in source.lines() {
        if let Some(idx) = line.find(PRINT_MARKER) {
            directives.push(Directive::Print(line[idx + PRINT_MARKER.len()..].to_string()));
        } else if let Some(idx) = line.find(NON_PRINT_MARKER) {
            directives.push(Directive::NonPrint(line[idx + NON_PRINT_MARKER.len()..].to_string()));
        }
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_both_marker_kinds_in_order() {
        let source = "print(\"hi\");\n///>hi\nassert(false); ///<Assertion><Error>a.egg(2,8): Assertion is untrue: false\n";
        let directives = parse_directives(source);
        assert_eq!(
            directives,
            vec![
                Directive::Print("hi".to_string()),
                Directive::NonPrint("Assertion><Error>a.egg(2,8): Assertion is untrue: false".to_string()),
            ]
        );
    }

    #[test]
    fn ignores_lines_without_a_marker() {
        assert!(parse_directives("int x = 1;\nprint(x);\n").is_empty());
    }
}
