//! Host-agnostic keyboard input types.
//!
//! Every embedding maps its native key events to these types. The navigation
//! layer never sees raw platform input.

use serde::{Deserialize, Serialize};

/// Keys the shell reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Backspace,
    Char(char),
}

/// Modifier keys held while a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
        meta: false,
    };

    /// Only Alt held.
    pub const ALT: Self = Self {
        alt: true,
        ctrl: false,
        shift: false,
        meta: false,
    };
}

/// A key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Alt+ArrowLeft, the "go back" shortcut.
    ///
    /// Only the Alt flag is checked; other held modifiers do not disable it.
    pub fn is_back_shortcut(&self) -> bool {
        self.modifiers.alt && self.key == Key::ArrowLeft
    }

    /// Parse a shortcut such as `"alt+left"` or `"ctrl+shift+x"`.
    ///
    /// Returns `None` for an unknown key name.
    pub fn parse(combo: &str) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        let mut key = None;
        for part in combo.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "alt" => modifiers.alt = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" => modifiers.meta = true,
                "left" | "arrowleft" => key = Some(Key::ArrowLeft),
                "right" | "arrowright" => key = Some(Key::ArrowRight),
                "up" | "arrowup" => key = Some(Key::ArrowUp),
                "down" | "arrowdown" => key = Some(Key::ArrowDown),
                "esc" | "escape" => key = Some(Key::Escape),
                "enter" | "return" => key = Some(Key::Enter),
                "backspace" => key = Some(Key::Backspace),
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Char(c)),
                        _ => return None,
                    }
                },
            }
        }
        key.map(|key| Self { key, modifiers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_left_is_back_shortcut() {
        let e = KeyEvent::new(Key::ArrowLeft, Modifiers::ALT);
        assert!(e.is_back_shortcut());
    }

    #[test]
    fn plain_left_is_not_back_shortcut() {
        let e = KeyEvent::new(Key::ArrowLeft, Modifiers::NONE);
        assert!(!e.is_back_shortcut());
    }

    #[test]
    fn alt_right_is_not_back_shortcut() {
        let e = KeyEvent::new(Key::ArrowRight, Modifiers::ALT);
        assert!(!e.is_back_shortcut());
    }

    #[test]
    fn parse_alt_left() {
        let e = KeyEvent::parse("Alt+Left").unwrap();
        assert_eq!(e, KeyEvent::new(Key::ArrowLeft, Modifiers::ALT));
    }

    #[test]
    fn parse_char_with_modifiers() {
        let e = KeyEvent::parse("ctrl+shift+x").unwrap();
        assert_eq!(e.key, Key::Char('x'));
        assert!(e.modifiers.ctrl);
        assert!(e.modifiers.shift);
        assert!(!e.modifiers.alt);
    }

    #[test]
    fn parse_rejects_unknown_key() {
        assert!(KeyEvent::parse("alt+spaceship").is_none());
        assert!(KeyEvent::parse("alt").is_none());
    }

    #[test]
    fn key_serde_roundtrip() {
        let json = serde_json::to_string(&Key::ArrowLeft).unwrap();
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Key::ArrowLeft);
    }
}
