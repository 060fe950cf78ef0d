use std::fmt;

/// Position of a single character in the source.
///
/// `offset` is the 0-based character index, `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Span {
    /// Span of the character following `ch`.
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {} (line {}, column {})",
            self.offset, self.line, self.column
        )
    }
}
