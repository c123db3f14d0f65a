//! Per-frame input snapshot consumed by the engine.
//!
//! The front end decides how keys and the pointer are polled; the engine only
//! sees which logical keys are held, which were pressed this frame, and a
//! single click edge with the cursor position.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Fire while playing, restart after game over.
    Fire,
    /// Pause while playing, resume while paused.
    Pause,
    /// Leave a finished or paused game.
    Exit,
}

#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    held: HashSet<Key>,
    pressed: Vec<Key>,
    /// Cursor in viewport coordinates.
    pub cursor: (i32, i32),
    /// True only on the frame the primary button went down.
    pub click: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held for this frame.
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Records a press edge; the key also counts as held.
    pub fn press(mut self, key: Key) -> Self {
        self.held.insert(key);
        self.pressed.push(key);
        self
    }

    pub fn click_at(mut self, x: i32, y: i32) -> Self {
        self.cursor = (x, y);
        self.click = true;
        self
    }

    pub fn cursor_at(mut self, x: i32, y: i32) -> Self {
        self.cursor = (x, y);
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Press edges in arrival order.
    pub fn pressed(&self) -> &[Key] {
        &self.pressed
    }
}
