//! Text buffer, the shared substrate both subsystems mutate.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with editing operations, coordinate
//! conversion between `Position` (line, col) and rope char indices, and
//! metadata tracking (path, modified flag).
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) insert/delete at any position, efficient
//!   line indexing, and solid Unicode handling. We build a small typed API on
//!   top rather than reimplementing text storage.
//!
//! - **Columns are char offsets**, not byte offsets. Column 3 of `"café"` is
//!   `'é'`, never a byte in the middle of its UTF-8 encoding. Byte offsets do
//!   not leak into the public API.
//!
//! - **No undo/redo here.** The edit log records and replays edits against
//!   this API; the buffer itself has no history.
//!
//! - **No file I/O here.** Reading and writing files belongs to the codec
//!   crate, which decides how metadata records wrap the raw text.

use std::fmt;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};

use crate::position::{Position, Range};

/// A text buffer backed by a rope.
///
/// # Coordinate system
///
/// All positions are 0-indexed `(line, col)` pairs counting Unicode scalar
/// values. Use [`pos_to_char_idx`](Self::pos_to_char_idx) and
/// [`char_idx_to_pos`](Self::char_idx_to_pos) to convert to rope-native char
/// indices. A column equal to a line's total char count is valid: it is the
/// position just past the last character, used for exclusive range endpoints
/// and the end-of-line cursor.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no file path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            path: None,
            modified: false,
        }
    }

    /// Create a buffer from a string. The buffer starts unmodified.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            path: None,
            modified: false,
        }
    }

    // -- Text access --------------------------------------------------------

    /// Total number of lines. An empty buffer has 1 line (the empty line);
    /// a buffer ending with `\n` has a trailing empty line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the buffer contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get a line by 0-indexed line number, including its trailing line
    /// ending (if any). Returns `None` if `line >= line_count()`.
    #[inline]
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        if line < self.rope.len_lines() {
            Some(self.rope.line(line))
        } else {
            None
        }
    }

    /// Number of chars in a line **excluding** any trailing line ending
    /// (`\n`, `\r\n`, `\r`). Valid cursor columns on the line are
    /// `0..=content_len`. Returns `None` if the line doesn't exist.
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(|rope_line| {
            let total = rope_line.len_chars();
            if total == 0 {
                return 0;
            }
            let last = rope_line.char(total - 1);
            if last == '\n' {
                // Could be \r\n, check the char before.
                if total >= 2 && rope_line.char(total - 2) == '\r' {
                    total - 2
                } else {
                    total - 1
                }
            } else if last == '\r' {
                total - 1
            } else {
                // Last line with no trailing newline.
                total
            }
        })
    }

    /// Get the character at a position. Returns `None` if the position is
    /// out of bounds.
    #[must_use]
    pub fn char_at(&self, pos: Position) -> Option<char> {
        let idx = self.pos_to_char_idx(pos)?;
        if idx < self.rope.len_chars() {
            Some(self.rope.char(idx))
        } else {
            None
        }
    }

    /// Get a slice of text for the given range. Returns `None` if either
    /// endpoint is out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range) -> Option<RopeSlice<'_>> {
        let start = self.pos_to_char_idx(range.start)?;
        let end = self.pos_to_char_idx(range.end)?;
        Some(self.rope.slice(start..end))
    }

    /// Collect all text into a `String`. Allocates; prefer `line()` or
    /// `slice()` for zero-copy access when possible.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Convert a `Position` (line, col) to an absolute char index.
    ///
    /// Returns `None` if the line is out of bounds or the column exceeds the
    /// line's total char count (including line ending). A column exactly
    /// equal to the line's char count is valid, one past the last character.
    #[must_use]
    pub fn pos_to_char_idx(&self, pos: Position) -> Option<usize> {
        if pos.line >= self.rope.len_lines() {
            return None;
        }
        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.rope.line(pos.line).len_chars();
        if pos.col > line_len {
            return None;
        }
        Some(line_start + pos.col)
    }

    /// Convert an absolute char index to a `Position` (line, col).
    ///
    /// Returns `None` if `char_idx > len_chars()`. An index equal to
    /// `len_chars()` returns the position just past the last character.
    #[must_use]
    pub fn char_idx_to_pos(&self, char_idx: usize) -> Option<Position> {
        if char_idx > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        Some(Position::new(line, char_idx - line_start))
    }

    /// The position one past the last character of the buffer. For
    /// `"hi\n"` this is line 1, column 0 (the trailing empty line).
    #[must_use]
    pub fn end_position(&self) -> Position {
        let len = self.rope.len_chars();
        let line = self.rope.char_to_line(len);
        let line_start = self.rope.line_to_char(line);
        Position::new(line, len - line_start)
    }

    /// Step `delta` characters forward (positive) or backward (negative)
    /// from a position, crossing line boundaries. Returns `None` when the
    /// starting position is invalid or the step leaves the buffer.
    #[must_use]
    pub fn offset(&self, pos: Position, delta: isize) -> Option<Position> {
        let idx = self.pos_to_char_idx(pos)?;
        let target = idx.checked_add_signed(delta)?;
        if target > self.rope.len_chars() {
            return None;
        }
        self.char_idx_to_pos(target)
    }

    /// Clamp a position to the nearest valid cursor position.
    ///
    /// - If `line >= line_count()`, clamps to the last line.
    /// - If `col > line_content_len()`, clamps to `line_content_len()`
    ///   (the insertion point after the last visible character).
    #[must_use]
    pub fn clamp_position(&self, pos: Position) -> Position {
        if self.is_empty() {
            return Position::ZERO;
        }

        let line = pos.line.min(self.line_count() - 1);
        let max_col = self.line_content_len(line).unwrap_or(0);
        let col = pos.col.min(max_col);

        Position::new(line, col)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert text at a position. Any position at or after `pos` shifts
    /// right by the length of the inserted text.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a valid position in the buffer.
    pub fn insert(&mut self, pos: Position, text: &str) {
        let idx = self
            .pos_to_char_idx(pos)
            .expect("insert position out of bounds");
        self.rope.insert(idx, text);
        self.modified = true;
    }

    /// Insert a single character at a position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a valid position in the buffer.
    pub fn insert_char(&mut self, pos: Position, ch: char) {
        let idx = self
            .pos_to_char_idx(pos)
            .expect("insert_char position out of bounds");
        self.rope.insert_char(idx, ch);
        self.modified = true;
    }

    /// Delete the text in a range. An empty range is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a valid position.
    pub fn delete(&mut self, range: Range) {
        if range.is_empty() {
            return;
        }
        let start = self
            .pos_to_char_idx(range.start)
            .expect("delete range start out of bounds");
        let end = self
            .pos_to_char_idx(range.end)
            .expect("delete range end out of bounds");
        self.rope.remove(start..end);
        self.modified = true;
    }

    // -- Metadata -----------------------------------------------------------

    /// The file path this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set the file path for this buffer.
    #[inline]
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// True if the buffer has been modified since the last save (or creation).
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the buffer as saved (not modified). Called after a successful
    /// write to disk.
    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
