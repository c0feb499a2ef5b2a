use std::fmt;

/// A half-open byte range into the source text.
///
/// Every token and AST node carries one, so any failure anywhere in the
/// pipeline can be reported against the exact slice of source it came from.
/// Row/column coordinates are not stored; they are derived on demand from the
/// source text when a diagnostic is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first character covered by the span.
    pub start: usize,
    /// Byte offset one past the last covered character.
    pub end: usize,
}

impl Span {
    /// Sentinel span used for synthesized constructs (such as the implicit
    /// `import std` performed before a program runs) that have no source
    /// location.
    pub const EOF: Self = Self {
        start: usize::MAX,
        end: usize::MAX,
    };

    /// Creates a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the span stretching from the start of `self` to the end of
    /// `other`. Used to give a compound AST node the extent of its outermost
    /// parts.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self {
            start: self.start,
            end: other.end,
        }
    }

    /// Shifts the span right by `offset` bytes.
    ///
    /// Nested lexer runs (string interpolation) produce spans relative to the
    /// extracted substring; this remaps them into the enclosing source's
    /// coordinates.
    #[must_use]
    pub const fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Returns `true` if this is the synthesized EOF sentinel.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        self.start == usize::MAX
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A row/column cursor into the source, derived from a byte offset.
///
/// Rows and columns are zero-based internally; diagnostics print them
/// one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub index: usize,
}

impl Position {
    /// Computes the row/column position of byte offset `index` in `source`.
    ///
    /// Offsets past the end of the text clamp to the final position, so the
    /// EOF sentinel renders against the last line rather than panicking.
    #[must_use]
    pub fn of(source: &str, index: usize) -> Self {
        let index = index.min(source.len());
        let mut row = 0;
        let mut col = 0;
        for ch in source[..index].chars() {
            if ch == '\n' {
                row += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        Self { row, col, index }
    }
}

/// Renders the source lines covered by `span`, each prefixed with its
/// one-based line number. This is the snippet shown above a diagnostic
/// message.
#[must_use]
pub fn snippet(source: &str, span: Span) -> String {
    if span.is_eof() || source.is_empty() {
        return String::from("<eof>");
    }

    let start = Position::of(source, span.start);
    let end = Position::of(source, span.end);
    let lines: Vec<&str> = source.lines().collect();

    let mut text = String::new();
    for row in start.row..=end.row.min(lines.len().saturating_sub(1)) {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&format!("{} | {}", row + 1, lines[row]));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_tracks_rows_and_columns() {
        let source = "ab\ncd";
        assert_eq!(Position::of(source, 0), Position { row: 0, col: 0, index: 0 });
        assert_eq!(Position::of(source, 4), Position { row: 1, col: 1, index: 4 });
    }

    #[test]
    fn snippet_covers_multiple_lines() {
        let source = "let x = 1\nlet y = 2";
        let text = snippet(source, Span::new(4, 14));
        assert_eq!(text, "1 | let x = 1\n2 | let y = 2");
    }
}
