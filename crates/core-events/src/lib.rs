//! Input event vocabulary consumed by the editing engine.
//!
//! The UI collaborator translates platform keyboard events into `KeyEvent`s;
//! the engine never sees raw platform payloads. Movement keys are routed to
//! the cursor movement engine, deletion keys to delete-by-motion, everything
//! printable to insertion.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Key press without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }

    pub fn ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    pub fn alt(&self) -> bool {
        self.mods.contains(KeyModifiers::ALT)
    }

    /// Motion this key maps to, if any (movement and deletion keys only).
    pub fn motion(&self) -> Option<MotionKind> {
        MotionKind::from_key_code(self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Normalized logical key representation.
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Esc,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

/// Motion vocabulary shared by the movement engine and delete-by-motion.
///
/// Only `Backspace` and `Delete` are valid deletion motions; the others are
/// cursor movements and are rejected by delete-by-motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Backspace,
    Delete,
}

impl MotionKind {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::Left => MotionKind::ArrowLeft,
            KeyCode::Right => MotionKind::ArrowRight,
            KeyCode::Up => MotionKind::ArrowUp,
            KeyCode::Down => MotionKind::ArrowDown,
            KeyCode::Home => MotionKind::Home,
            KeyCode::End => MotionKind::End,
            KeyCode::Backspace => MotionKind::Backspace,
            KeyCode::Delete => MotionKind::Delete,
            _ => return None,
        })
    }

    /// True for keys that move the cursor without editing.
    pub fn is_movement(self) -> bool {
        !self.is_deletion()
    }

    pub fn is_deletion(self) -> bool {
        matches!(self, MotionKind::Backspace | MotionKind::Delete)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
