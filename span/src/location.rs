use std::fmt;
use std::rc::Rc;

/// The name of a loaded source, shared cheaply between every node that
/// points back into it.
pub type SourceName = Rc<str>;

/// A source location: `(source, line0, column0, line1, column1)`.
///
/// `line0 == column0 == 0` means "unknown" (used for synthesized nodes that
/// have no useful position, such as built-ins). A location with
/// `(line0, column0) == (line1, column1)` is a point; otherwise it is a
/// range spanning from the first position to the second.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: SourceName,
    pub line0: u32,
    pub column0: u32,
    pub line1: u32,
    pub column1: u32,
}

impl Location {
    pub fn unknown(source: SourceName) -> Self {
        Self { source, line0: 0, column0: 0, line1: 0, column1: 0 }
    }

    pub fn point(source: SourceName, line: u32, column: u32) -> Self {
        Self { source, line0: line, column0: column, line1: line, column1: column }
    }

    pub fn is_unknown(&self) -> bool {
        self.line0 == 0 && self.column0 == 0
    }

    pub fn has_column(&self) -> bool {
        self.column0 != 0
    }

    /// Spans `self` and `other` into the smallest range covering both.
    pub fn span(&self, other: &Location) -> Location {
        if self.is_unknown() {
            return other.clone();
        }
        if other.is_unknown() {
            return self.clone();
        }

        let (line0, column0) =
            if (self.line0, self.column0) <= (other.line0, other.column0) {
                (self.line0, self.column0)
            } else {
                (other.line0, other.column0)
            };
        let (line1, column1) =
            if (self.line1, self.column1) >= (other.line1, other.column1) {
                (self.line1, self.column1)
            } else {
                (other.line1, other.column1)
            };

        Location { source: self.source.clone(), line0, column0, line1, column1 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "{}", self.source);
        }

        if self.line0 == self.line1 {
            if !self.has_column() {
                return write!(f, "{}({})", self.source, self.line0);
            }
            if self.column0 == self.column1 {
                return write!(f, "{}({},{})", self.source, self.line0, self.column0);
            }
            return write!(f, "{}({},{}-{})", self.source, self.line0, self.column0, self.column1);
        }

        write!(f, "{}({}-{},{}-{})", self.source, self.line0, self.line1, self.column0, self.column1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> SourceName {
        Rc::from("test.egg")
    }

    #[test]
    fn unknown_renders_bare_source() {
        assert_eq!(Location::unknown(src()).to_string(), "test.egg");
    }

    #[test]
    fn point_renders_line_and_column() {
        assert_eq!(Location::point(src(), 1, 7).to_string(), "test.egg(1,7)");
    }

    #[test]
    fn span_across_lines_renders_ranges() {
        let a = Location::point(src(), 1, 3);
        let b = Location::point(src(), 2, 5);
        assert_eq!(a.span(&b).to_string(), "test.egg(1-2,3-5)");
    }

    #[test]
    fn span_on_same_line_renders_column_range() {
        let a = Location::point(src(), 4, 2);
        let b = Location::point(src(), 4, 9);
        assert_eq!(a.span(&b).to_string(), "test.egg(4,2-9)");
    }
}
