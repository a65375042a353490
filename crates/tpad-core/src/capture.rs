//! Keystroke capture, the policy that feeds the edit log.
//!
//! Capture is pure: it looks at one input event plus the buffer as it stands
//! **before** the mutation, and produces at most one [`Edit`]. The caller
//! then records the edit and performs the actual buffer change. Because
//! capture never touches the post-mutation state, the recorded text is
//! always the character that really appeared or disappeared.
//!
//! # What gets recorded
//!
//! | Event                          | Edit                                   |
//! |--------------------------------|----------------------------------------|
//! | alphanumeric char, no chord    | `Insert` of that char at the cursor    |
//! | Backspace                      | `Delete` of the char before the cursor |
//! | Delete                         | `Delete` of the char at the cursor     |
//! | paste                          | `Insert` of the whole chunk            |
//! | anything else                  | nothing                                |
//!
//! Whitespace and punctuation keystrokes mutate the buffer but are **not**
//! recorded; undo steps only through captured edits, so after typing
//! `"a b"` two undos remove `b` and `a` and the space stays put.
//!
//! When the character an edit would need does not exist (Backspace at the
//! start of the buffer, Delete at the end), the edit is silently dropped:
//! no record, no error.

use crate::buffer::Buffer;
use crate::history::Edit;
use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::position::Position;

/// Modifier chords that mean "this keystroke is a command, not text".
const CHORD: Modifiers = Modifiers::CTRL
    .union(Modifiers::ALT)
    .union(Modifiers::SUPER);

/// Classify a keystroke against the pre-mutation buffer snapshot.
///
/// `cursor` is the insertion point at the moment the key is pressed.
/// Returns the edit to record, or `None` for keystrokes that should leave
/// no trace in the log.
#[must_use]
pub fn capture_key(event: &KeyEvent, buf: &Buffer, cursor: Position) -> Option<Edit> {
    if event.modifiers.intersects(CHORD) {
        return None;
    }

    match event.code {
        KeyCode::Char(ch) if ch.is_alphanumeric() => Some(Edit::Insert {
            pos: cursor,
            text: ch.to_string(),
        }),
        KeyCode::Backspace => {
            let prev = buf.offset(cursor, -1)?;
            let ch = buf.char_at(prev)?;
            Some(Edit::Delete {
                pos: prev,
                text: ch.to_string(),
            })
        }
        KeyCode::Delete => {
            let ch = buf.char_at(cursor)?;
            Some(Edit::Delete {
                pos: cursor,
                text: ch.to_string(),
            })
        }
        _ => None,
    }
}

/// Capture a paste as a single edit.
///
/// The whole pasted chunk becomes one `Insert` at the pre-paste cursor, so
/// one undo removes it entirely. An empty paste is dropped.
#[must_use]
pub fn capture_paste(cursor: Position, text: &str) -> Option<Edit> {
    if text.is_empty() {
        return None;
    }
    Some(Edit::Insert {
        pos: cursor,
        text: text.to_string(),
    })
}
