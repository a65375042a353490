//! Undo/redo history, a linear log of single edits.
//!
//! Every recorded mutation is one reversible [`Edit`]. The log keeps two
//! stacks: edits that can be undone and edits that can be redone. `undo`
//! pops the newest edit, plays it backwards against the buffer, and moves it
//! to the redo stack; `redo` is the mirror image. Recording a new edit
//! discards the redo stack, so history is strictly linear.
//!
//! The log never decides *what* gets recorded. That policy lives in
//! [`capture`](crate::capture), which turns keystrokes and pastes into
//! edits; the log just stores and replays whatever it is given.
//!
//! Running out of history is not an error: `undo`/`redo` return `false` and
//! leave the buffer alone.

use crate::buffer::Buffer;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// A single reversible buffer edit.
///
/// Each edit carries the position and the exact text involved, which is
/// enough to replay it in either direction without consulting any other
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `text` was inserted with its first character at `pos`.
    /// Undo = delete it. Redo = insert it.
    Insert { pos: Position, text: String },

    /// `text` was deleted starting at `pos`. Undo = insert it back.
    /// Redo = delete it again.
    Delete { pos: Position, text: String },
}

impl Edit {
    /// Replay this edit forward against a buffer.
    ///
    /// # Panics
    ///
    /// Panics if the edit's position is not valid in `buf`. Edits are only
    /// replayed against the buffer state they were recorded in, so a valid
    /// log never trips this.
    pub fn apply(&self, buf: &mut Buffer) {
        match self {
            Self::Insert { pos, text } => {
                buf.insert(*pos, text);
            }
            Self::Delete { pos, text } => {
                let end = end_after_insert(*pos, text);
                buf.delete(Range::new(*pos, end));
            }
        }
    }

    /// Play this edit backwards against a buffer, undoing its effect.
    ///
    /// # Panics
    ///
    /// Panics if the edit's position is not valid in `buf` (see
    /// [`apply`](Self::apply)).
    pub fn revert(&self, buf: &mut Buffer) {
        match self {
            Self::Insert { pos, text } => {
                let end = end_after_insert(*pos, text);
                buf.delete(Range::new(*pos, end));
            }
            Self::Delete { pos, text } => {
                buf.insert(*pos, text);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo/redo history for a buffer.
///
/// New edits clear the redo stack: branching history is not supported, any
/// recording after an undo discards the forward states for good.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Edit>,
    redo_stack: Vec<Edit>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Record an edit that was (or is about to be) applied to the buffer.
    /// Clears the redo stack.
    pub fn record(&mut self, edit: Edit) {
        self.redo_stack.clear();
        self.undo_stack.push(edit);
    }

    /// Undo the most recent edit. Returns `false` when there is nothing to
    /// undo; the buffer is untouched in that case.
    pub fn undo(&mut self, buf: &mut Buffer) -> bool {
        let Some(edit) = self.undo_stack.pop() else {
            return false;
        };
        edit.revert(buf);
        self.redo_stack.push(edit);
        true
    }

    /// Redo the most recently undone edit. Returns `false` when there is
    /// nothing to redo; the buffer is untouched in that case.
    pub fn redo(&mut self, buf: &mut Buffer) -> bool {
        let Some(edit) = self.redo_stack.pop() else {
            return false;
        };
        edit.apply(buf);
        self.undo_stack.push(edit);
        true
    }

    /// True if there are edits that can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True if there are edits that can be redone.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of edits on the undo stack.
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of edits on the redo stack.
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history. Used when the document is replaced wholesale, e.g.
    /// after loading a file.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute the position just past `text` if it were inserted at `start`.
///
/// Walks the text's line breaks to find the final line and column. Handles
/// `\n`, `\r\n`, and `\r`.
fn end_after_insert(start: Position, text: &str) -> Position {
    let mut line = start.line;
    let mut col = start.col;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                line += 1;
                col = 0;
            }
            '\r' => {
                line += 1;
                col = 0;
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => {
                col += 1;
            }
        }
    }

    Position::new(line, col)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
