//! Keyboard input state
//!
//! Key handlers write single flags as events arrive; the frame loop takes a
//! snapshot once per step. Writes are last-write-wins and nothing is queued.

use crate::sim::TickInput;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Control {
    /// Map a `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Control::MoveRight),
            "ArrowUp" | "w" | "W" | " " => Some(Control::Jump),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::MoveLeft => "MoveLeft",
            Control::MoveRight => "MoveRight",
            Control::Jump => "Jump",
        }
    }
}

/// Live pressed/released state of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    move_left: bool,
    move_right: bool,
    jump: bool,
}

impl InputState {
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::MoveLeft => self.move_left = pressed,
            Control::MoveRight => self.move_right = pressed,
            Control::Jump => self.jump = pressed,
        }
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        match control {
            Control::MoveLeft => self.move_left,
            Control::MoveRight => self.move_right,
            Control::Jump => self.jump,
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Current state as a tick input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            jump: self.jump,
        }
    }
}
