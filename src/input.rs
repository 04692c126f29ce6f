//! Keyboard state as seen by the simulation
//!
//! The host translates raw key events into `press`/`release`; the simulation
//! only ever asks `is_held` and `consume`.

use serde::{Deserialize, Serialize};

/// Logical keys the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Down,
    Pause,
}

const KEY_COUNT: usize = 5;

impl Key {
    const fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Jump => 2,
            Key::Down => 3,
            Key::Pause => 4,
        }
    }

    /// Map a DOM-style key name to a logical key
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "ArrowUp" | "w" | "W" => Some(Key::Jump),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "Escape" | "p" | "P" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Held and consumed flags per key
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; KEY_COUNT],
    consumed: [bool; KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    /// Releasing a key re-arms it for `consume`
    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
        self.consumed[key.index()] = false;
    }

    pub fn set(&mut self, key: Key, is_down: bool) {
        if is_down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// One-shot read: true the first time it is called for a held key, then
    /// false until the key has been released and pressed again.
    pub fn consume(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.held[i] && !self.consumed[i] {
            self.consumed[i] = true;
            true
        } else {
            false
        }
    }

    /// Drop every held key (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
