//! Toolkit-neutral key events.
//!
//! The capture layer classifies keystrokes without knowing where they came
//! from: a GUI toolkit, a terminal parser, or a test feeding synthetic
//! events. This module is that common vocabulary. Only the keys a plain
//! notepad reacts to get variants; anything else a frontend produces simply
//! never reaches [`capture_key`](crate::capture::capture_key).

use bitflags::bitflags;

/// Identity of a key.
///
/// Printable characters use [`Char`](KeyCode::Char); named keys have
/// dedicated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    // -- Named keys ---------------------------------------------------------
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // -- Navigation ---------------------------------------------------------
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

/// A keyboard event: key identity plus active modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key event with no modifiers held.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// A bare character keystroke.
    #[inline]
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// A Ctrl+character chord.
    #[inline]
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_has_no_modifiers() {
        let ev = KeyEvent::plain(KeyCode::Backspace);
        assert_eq!(ev.code, KeyCode::Backspace);
        assert!(ev.modifiers.is_empty());
    }

    #[test]
    fn char_wraps_keycode() {
        assert_eq!(KeyEvent::char('x').code, KeyCode::Char('x'));
    }

    #[test]
    fn ctrl_sets_only_ctrl() {
        let ev = KeyEvent::ctrl('z');
        assert_eq!(ev.code, KeyCode::Char('z'));
        assert!(ev.modifiers.contains(Modifiers::CTRL));
        assert!(!ev.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn modifiers_combine() {
        let m = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
    }
}
