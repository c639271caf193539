use indexmap::IndexMap;
use std::fmt;

/// A reason template with `{name}` placeholders plus the parameters that
/// fill them in.
///
/// Keeping the template and the parameters apart (rather than formatting
/// eagerly) lets the handful of reserved keys (`reason`, `name`, `origin`,
/// `location`) be populated by whichever layer knows them, while arbitrary
/// extra keys come from the call site that first noticed the problem.
#[derive(Clone, Debug, Default)]
pub struct Message {
    template: String,
    params: IndexMap<String, String>,
}

impl Message {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into(), params: IndexMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn format(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let Some(end) = rest[start..].find('}') else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let name = &rest[start + 1..start + end];
            match self.params.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &rest[start + end + 1..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_named_placeholders() {
        let m = Message::new("Assertion is untrue: {lhs} {op} {rhs}")
            .with("lhs", 1)
            .with("op", "==")
            .with("rhs", 2);
        assert_eq!(m.format(), "Assertion is untrue: 1 == 2");
    }

    #[test]
    fn leaves_unknown_placeholders_untouched() {
        let m = Message::new("got {thing}");
        assert_eq!(m.format(), "got {thing}");
    }
}
