//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad (gilrs) input once per
//! rendered frame, combining them into a unified action-based API.

use macroquad::prelude::*;
use crate::game::FrameInput;
use super::gamepad::{button, Gamepad};
use super::Action;

/// Keys bound to each action; any of them triggers it
fn keys_for(action: Action) -> &'static [KeyCode] {
    match action {
        Action::MoveLeft => &[KeyCode::Left, KeyCode::A],
        Action::MoveRight => &[KeyCode::Right, KeyCode::D],
        Action::Jump => &[KeyCode::Space, KeyCode::W, KeyCode::Up],
        Action::Quit => &[KeyCode::Escape],
        Action::ToggleDebug => &[KeyCode::F1],
        Action::Reset => &[KeyCode::R],
        Action::ExportLevel => &[KeyCode::F5],
    }
}

/// Set of actions, one bit per variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        self.0 |= 1 << action as u8;
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & (1 << action as u8) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = Self::default();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
    /// Actions held this frame
    down: ActionSet,
    /// Actions that went down this frame
    pressed: ActionSet,
}

impl InputState {
    pub fn new() -> Self {
        let gamepad = Gamepad::new();
        if gamepad.has_gamepad() {
            log::info!("Gamepad connected");
        }
        Self {
            gamepad,
            down: ActionSet::default(),
            pressed: ActionSet::default(),
        }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
        self.down = Action::ALL
            .into_iter()
            .filter(|&a| self.keyboard_down(a) || self.gamepad_down(a))
            .collect();
        self.pressed = Action::ALL
            .into_iter()
            .filter(|&a| self.keyboard_pressed(a) || self.gamepad_pressed(a))
            .collect();
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    /// What the simulation should do this frame
    pub fn frame_input(&self) -> FrameInput {
        frame_input(self.down, self.pressed)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        keys_for(action).iter().any(|&key| is_key_down(key))
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        keys_for(action).iter().any(|&key| is_key_pressed(key))
    }

    fn gamepad_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => {
                self.gamepad.is_button_down(button::DPAD_LEFT) || self.gamepad.left_stick_x() < 0.0
            }
            Action::MoveRight => {
                self.gamepad.is_button_down(button::DPAD_RIGHT) || self.gamepad.left_stick_x() > 0.0
            }
            Action::Jump => {
                self.gamepad.is_button_down(button::SOUTH) || self.gamepad.is_button_down(button::DPAD_UP)
            }
            Action::Quit => self.gamepad.is_button_down(button::SELECT),
            Action::Reset => self.gamepad.is_button_down(button::START),
            Action::ToggleDebug | Action::ExportLevel => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => {
                self.gamepad.is_button_pressed(button::SOUTH) || self.gamepad.is_button_pressed(button::DPAD_UP)
            }
            Action::Quit => self.gamepad.is_button_pressed(button::SELECT),
            Action::Reset => self.gamepad.is_button_pressed(button::START),
            _ => false,
        }
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Movement follows held keys; jumping only on a fresh press
pub fn frame_input(down: ActionSet, pressed: ActionSet) -> FrameInput {
    FrameInput {
        left: down.contains(Action::MoveLeft),
        right: down.contains(Action::MoveRight),
        jump: pressed.contains(Action::Jump),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_set() {
        let set: ActionSet = [Action::Jump, Action::Reset].into_iter().collect();
        assert!(set.contains(Action::Jump));
        assert!(set.contains(Action::Reset));
        assert!(!set.contains(Action::Quit));
        assert!(ActionSet::default().is_empty());
    }

    #[test]
    fn test_holding_jump_does_not_repeat() {
        let held: ActionSet = [Action::MoveRight, Action::Jump].into_iter().collect();

        let first = frame_input(held, [Action::Jump].into_iter().collect());
        assert_eq!(first, FrameInput { left: false, right: true, jump: true });

        let next = frame_input(held, ActionSet::default());
        assert_eq!(next, FrameInput { left: false, right: true, jump: false });
    }

    #[test]
    fn test_every_action_has_a_key() {
        for action in Action::ALL {
            assert!(!keys_for(action).is_empty(), "{:?} has no key", action);
        }
    }
}
