//! Input events and per-frame snapshots
//!
//! The host feeds discrete events; [`InputState`] folds them into a
//! snapshot of held keys, the pointer position and this frame's edges.

use glam::Vec2;

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Dash,
    Fly,
    Pause,
    Restart,
    ToggleFps,
    /// Anything else (still counts as "any key" on the intro screen)
    Other,
}

impl Key {
    const ALL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Dash,
        Key::Fly,
        Key::Pause,
        Key::Restart,
        Key::ToggleFps,
        Key::Other,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A discrete event from the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMoved(Vec2),
    MouseDown { button: MouseButton, pos: Vec2 },
    /// Window close / quit request
    Quit,
}

/// Set of keys, stored as a bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u16);

impl KeySet {
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

/// Everything a screen needs to know about input for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Keys currently held down
    pub held: KeySet,
    /// Keys that went down this frame
    pub pressed: KeySet,
    /// Pointer position in arena coordinates
    pub pointer: Vec2,
    /// Raw events received this frame, in order
    pub events: Vec<InputEvent>,
    pub quit_requested: bool,
}

impl FrameInput {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    /// Primary mouse presses this frame
    pub fn clicks(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::MouseDown {
                button: MouseButton::Left,
                pos,
            } => Some(*pos),
            _ => None,
        })
    }
}

/// Tracks held keys and the pointer across frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: KeySet,
    pointer: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this frame's events into a snapshot
    pub fn begin_frame(&mut self, events: &[InputEvent]) -> FrameInput {
        let mut pressed = KeySet::default();
        let mut quit_requested = false;

        for event in events {
            match *event {
                InputEvent::KeyDown(key) => {
                    // Auto-repeat keydowns are not new presses
                    if !self.held.contains(key) {
                        pressed.insert(key);
                    }
                    self.held.insert(key);
                }
                InputEvent::KeyUp(key) => self.held.remove(key),
                InputEvent::PointerMoved(pos) => self.pointer = pos,
                InputEvent::MouseDown { pos, .. } => self.pointer = pos,
                InputEvent::Quit => quit_requested = true,
            }
        }

        FrameInput {
            held: self.held,
            pressed,
            pointer: self.pointer,
            events: events.to_vec(),
            quit_requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_persists_across_frames() {
        let mut input = InputState::new();
        let frame = input.begin_frame(&[InputEvent::KeyDown(Key::Left)]);
        assert!(frame.is_held(Key::Left));
        assert!(frame.was_pressed(Key::Left));

        let frame = input.begin_frame(&[]);
        assert!(frame.is_held(Key::Left));
        assert!(!frame.was_pressed(Key::Left));

        let frame = input.begin_frame(&[InputEvent::KeyUp(Key::Left)]);
        assert!(!frame.is_held(Key::Left));
    }

    #[test]
    fn test_repeat_keydown_is_not_a_press() {
        let mut input = InputState::new();
        input.begin_frame(&[InputEvent::KeyDown(Key::Dash)]);
        let frame = input.begin_frame(&[InputEvent::KeyDown(Key::Dash)]);
        assert!(!frame.was_pressed(Key::Dash));
    }

    #[test]
    fn test_click_updates_pointer() {
        let mut input = InputState::new();
        let pos = Vec2::new(120.0, 40.0);
        let frame = input.begin_frame(&[InputEvent::MouseDown {
            button: MouseButton::Left,
            pos,
        }]);
        assert_eq!(frame.pointer, pos);
        assert_eq!(frame.clicks().collect::<Vec<_>>(), vec![pos]);
    }

    #[test]
    fn test_keyset_iter() {
        let mut set = KeySet::default();
        set.insert(Key::Fly);
        set.insert(Key::Other);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Key::Fly, Key::Other]);
    }
}
