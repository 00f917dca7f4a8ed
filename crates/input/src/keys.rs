//! Keyboard vocabulary for camera movement.

use winit::keyboard::KeyCode;

/// Camera-relative movement directions driven by held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    /// Direction bound to a key, if any. Arrows and WASD share bindings; R/F fly up/down.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(MoveDirection::Forward),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(MoveDirection::Left),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(MoveDirection::Backward),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(MoveDirection::Right),
            KeyCode::KeyR => Some(MoveDirection::Up),
            KeyCode::KeyF => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

/// Held state of every movement direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveFlags {
    pub fn set(&mut self, direction: MoveDirection, held: bool) {
        match direction {
            MoveDirection::Forward => self.forward = held,
            MoveDirection::Backward => self.backward = held,
            MoveDirection::Left => self.left = held,
            MoveDirection::Right => self.right = held,
            MoveDirection::Up => self.up = held,
            MoveDirection::Down => self.down = held,
        }
    }
}

/// Translate a legacy DOM `keyCode` into the key it names.
pub fn key_from_dom_code(code: u32) -> Option<KeyCode> {
    match code {
        37 => Some(KeyCode::ArrowLeft),
        38 => Some(KeyCode::ArrowUp),
        39 => Some(KeyCode::ArrowRight),
        40 => Some(KeyCode::ArrowDown),
        65 => Some(KeyCode::KeyA),
        68 => Some(KeyCode::KeyD),
        70 => Some(KeyCode::KeyF),
        82 => Some(KeyCode::KeyR),
        83 => Some(KeyCode::KeyS),
        87 => Some(KeyCode::KeyW),
        _ => None,
    }
}
