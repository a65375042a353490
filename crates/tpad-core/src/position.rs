//! Text position and range types.
//!
//! All coordinates are **0-indexed**: line 0 is the first line, column 0 the
//! first character. Columns count Unicode scalar values (chars), not bytes,
//! which is exactly how `ropey` indexes text. A column equal to the line's
//! content length is the end-of-line insertion point.
//!
//! Human-facing layers (status line, messages) convert to 1-indexed at the
//! rim; that conversion never belongs here. The on-disk `.txtp` wire form has
//! its own formatting rules and lives in the codec crate.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A position in a text buffer: (line, column), both 0-indexed.
///
/// # Ordering
///
/// Positions order lexicographically, line first, then column:
/// `Position { line: 0, col: 9 }` < `Position { line: 1, col: 0 }`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin, line 0 column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range in a text buffer: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive; `start == end` is the empty
/// range. [`Range::new`] requires `start <= end` (debug-asserted), so callers
/// holding two arbitrary endpoints must compare before constructing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.line < end.line || (start.line == end.line && start.col <= end.col),
            "Range::new requires start <= end"
        );
        Self { start, end }
    }

    /// True when the range spans zero characters (`start == end`).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.line == self.end.line && self.start.col == self.end.col
    }

    /// True when the given position falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range({}:{} .. {}:{})",
            self.start.line, self.start.col, self.end.line, self.end.col
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for humans.
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Position -----------------------------------------------------------

    #[test]
    fn position_zero_is_origin() {
        let p = Position::ZERO;
        assert_eq!(p.line, 0);
        assert_eq!(p.col, 0);
    }

    #[test]
    fn position_ordering_same_line() {
        let a = Position::new(1, 3);
        let b = Position::new(1, 7);
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn position_ordering_line_dominates_column() {
        let a = Position::new(0, 100);
        let b = Position::new(1, 0);
        assert!(a < b);
    }

    #[test]
    fn position_ord_is_consistent() {
        let positions = [
            Position::ZERO,
            Position::new(0, 1),
            Position::new(0, 100),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(10, 0),
        ];
        for window in positions.windows(2) {
            assert!(window[0] <= window[1], "{:?} should be <= {:?}", window[0], window[1]);
        }
    }

    #[test]
    fn position_debug_format() {
        let p = Position::new(2, 5);
        assert_eq!(format!("{p:?}"), "Pos(2:5)");
    }

    #[test]
    fn position_display_is_1_indexed() {
        assert_eq!(format!("{}", Position::ZERO), "1:1");
        assert_eq!(format!("{}", Position::new(9, 14)), "10:15");
    }

    // -- Range --------------------------------------------------------------

    #[test]
    fn range_new_valid() {
        let r = Range::new(Position::new(1, 0), Position::new(1, 5));
        assert_eq!(r.start, Position::new(1, 0));
        assert_eq!(r.end, Position::new(1, 5));
    }

    #[test]
    fn range_new_same_position_is_empty() {
        let p = Position::new(2, 3);
        let r = Range::new(p, p);
        assert!(r.is_empty());
    }

    #[test]
    fn range_is_empty() {
        assert!(Range::new(Position::new(5, 5), Position::new(5, 5)).is_empty());
        assert!(!Range::new(Position::new(0, 0), Position::new(0, 1)).is_empty());
    }

    #[test]
    fn range_contains_start_excludes_end() {
        let r = Range::new(Position::new(1, 0), Position::new(1, 5));
        assert!(r.contains(Position::new(1, 0)));
        assert!(r.contains(Position::new(1, 3)));
        assert!(!r.contains(Position::new(1, 5)));
    }

    #[test]
    fn range_contains_multiline() {
        let r = Range::new(Position::new(1, 0), Position::new(3, 0));
        assert!(r.contains(Position::new(2, 50))); // middle line, any col
        assert!(!r.contains(Position::new(0, 100))); // before range
        assert!(!r.contains(Position::new(3, 0))); // at end (exclusive)
    }

    #[test]
    fn empty_range_contains_nothing() {
        let p = Position::new(5, 5);
        assert!(!Range::new(p, p).contains(p));
    }

    #[test]
    fn range_debug_format() {
        let r = Range::new(Position::new(1, 2), Position::new(3, 4));
        assert_eq!(format!("{r:?}"), "Range(1:2 .. 3:4)");
    }

    #[test]
    fn range_display_is_1_indexed() {
        let r = Range::new(Position::new(0, 0), Position::new(2, 5));
        assert_eq!(format!("{r}"), "1:1-3:6");
    }
}
