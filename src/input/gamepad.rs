//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad backend; keyboard only

// Standard gamepad button bits (Xbox layout naming)
pub mod button {
    pub const SOUTH: u32 = 0;       // A / Cross
    pub const SELECT: u32 = 1;      // Back/Select
    pub const START: u32 = 2;       // Start/Options
    pub const DPAD_LEFT: u32 = 3;
    pub const DPAD_RIGHT: u32 = 4;
    pub const DPAD_UP: u32 = 5;
}

/// Stick deflection below this reads as centred
pub const STICK_DEADZONE: f32 = 0.3;

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_pressed(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick_x(&self) -> f32 {
            0.0
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use gilrs::{Axis, Button as GilrsButton, Gilrs};

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
        buttons: u32,
        last_buttons: u32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    log::warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                buttons: 0,
                last_buttons: 0,
            }
        }

        /// Call once per frame: drains gilrs events and latches the button mask
        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            while let Some(event) = gilrs.next_event() {
                log::trace!("gamepad event: {:?}", event.event);
            }
            self.last_buttons = self.buttons;
            self.buttons = self.read_buttons();
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn read_buttons(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << super::button::SOUTH; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << super::button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << super::button::START; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << super::button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << super::button::DPAD_RIGHT; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << super::button::DPAD_UP; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            (self.buttons & (1 << button)) != 0
        }

        /// Went down between the last two polls
        pub fn is_button_pressed(&self, button: u32) -> bool {
            super::rising_edge(self.last_buttons, self.buttons, button)
        }

        pub fn left_stick_x(&self) -> f32 {
            let Some(gp) = self.active() else { return 0.0 };
            super::apply_deadzone(gp.value(Axis::LeftStickX), super::STICK_DEADZONE)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Zero out small deflections, rescale the rest to 0.0..1.0
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    let len = value.abs();
    if len < deadzone {
        return 0.0;
    }
    value.signum() * ((len - deadzone) / (1.0 - deadzone)).min(1.0)
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn rising_edge(last: u32, current: u32, button: u32) -> bool {
    let bit = 1 << button;
    (current & bit) != 0 && (last & bit) == 0
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.2, 0.3), 0.0);
        assert_eq!(apply_deadzone(-0.29, 0.3), 0.0);
        assert_eq!(apply_deadzone(1.0, 0.3), 1.0);
        assert_eq!(apply_deadzone(-1.0, 0.3), -1.0);
        assert!((apply_deadzone(0.65, 0.3) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rising_edge() {
        let south = 1 << button::SOUTH;
        assert!(rising_edge(0, south, button::SOUTH));
        assert!(!rising_edge(south, south, button::SOUTH));
        assert!(!rising_edge(south, 0, button::SOUTH));
        assert!(!rising_edge(0, south, button::START));
    }
}
