//! Keyboard state consumed by the navigator once per frame.

use std::collections::HashSet;

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// The multi-selection modifier.
    Control,
    Shift,
    /// Combined with [`Key::Control`] to select every expanded node.
    A,
    Char(char),
    Other,
}

/// Modifier keys held during a pointer or key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

/// Current-frame key queries.
pub trait InputState {
    /// The key went down during this frame (edge-triggered).
    fn key_pressed(&self, key: Key) -> bool;

    /// The key is currently held (level-triggered).
    fn key_held(&self, key: Key) -> bool;
}

/// Input snapshot for a single frame.
///
/// Terminals only report key presses, so a key seen this frame counts as both
/// pressed and held. Modifiers can be held without being pressed.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pressed: HashSet<Key>,
    held: HashSet<Key>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press for this frame.
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
        self.held.insert(key);
    }

    /// Mark a key as held without a press edge.
    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        if modifiers.ctrl {
            self.hold(Key::Control);
        }
        if modifiers.shift {
            self.hold(Key::Shift);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Forget everything at the end of a frame.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.held.clear();
    }

    /// End a frame, keeping `keys` held if they were held during it.
    pub fn carry_over(&mut self, keys: &[Key]) {
        let kept: Vec<Key> = keys
            .iter()
            .copied()
            .filter(|key| self.held.contains(key))
            .collect();
        self.clear();
        self.held.extend(kept);
    }
}

impl InputState for FrameInput {
    fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
