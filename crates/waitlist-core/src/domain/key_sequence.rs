//! Bounded buffer of the most recent key presses.
//!
//! The form listens for a secret key sequence (the Konami code) and rewards
//! it with an extra celebration.  Detecting it only requires remembering the
//! last `N` keys, where `N` is the length of the sequence, so the buffer is a
//! fixed-capacity ring: pushing into a full buffer evicts the oldest key.
//!
//! ```text
//! capacity 4, target [A B C D]
//!
//! push X  → [X]
//! push A  → [X A]
//! push B  → [X A B]
//! push C  → [X A B C]
//! push D  → [A B C D]   ← X evicted, matches target
//! ```
//!
//! The buffer is owned by whichever component handles keyboard input.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A key press, reduced to what the form cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    /// A printable character, always stored lowercase.
    Char(char),
    /// Anything else (function keys, modifiers, ...).
    Other,
}

impl Key {
    /// Builds a [`Key::Char`], folding ASCII letters to lowercase so that
    /// `B` and `b` are the same key.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }

    /// Parses a DOM-style key name (`"ArrowUp"`, `"Escape"`, `"b"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// ↑ ↑ ↓ ↓ ← → ← → B A
pub const KONAMI_SEQUENCE: [Key; 10] = [
    Key::ArrowUp,
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::Char('b'),
    Key::Char('a'),
];

/// Fixed-capacity ring buffer that watches for one target sequence.
#[derive(Debug, Clone)]
pub struct KeySequenceBuffer {
    target: Vec<Key>,
    recent: VecDeque<Key>,
}

impl KeySequenceBuffer {
    /// Creates a buffer watching for `target`.  Capacity equals its length.
    pub fn new(target: &[Key]) -> Self {
        Self {
            target: target.to_vec(),
            recent: VecDeque::with_capacity(target.len()),
        }
    }

    /// Creates a buffer watching for [`KONAMI_SEQUENCE`].
    pub fn konami() -> Self {
        Self::new(&KONAMI_SEQUENCE)
    }

    /// Records `key`, evicting the oldest key if the buffer is full.
    ///
    /// Returns `true` when the buffer now holds exactly the target sequence.
    /// The buffer is *not* reset automatically; call [`reset`](Self::reset)
    /// after acting on a match.
    pub fn push(&mut self, key: Key) -> bool {
        if self.target.is_empty() {
            return false;
        }
        if self.recent.len() == self.target.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(key);
        self.is_match()
    }

    /// Returns `true` if the buffered keys equal the target sequence.
    pub fn is_match(&self) -> bool {
        self.recent.len() == self.target.len() && self.recent.iter().eq(self.target.iter())
    }

    pub fn reset(&mut self) {
        self.recent.clear();
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.target.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
