//! Animation state selection
//!
//! The player's sheet is picked from its motion every tick; the frame
//! within the sheet advances every `animation_delay` ticks.

use crate::sprite::{Facing, SpriteSheets};

/// Which animation sheet the player shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    DoubleJump,
    Fall,
}

impl AnimationState {
    pub const ALL: [AnimationState; 5] = [
        AnimationState::Idle,
        AnimationState::Run,
        AnimationState::Jump,
        AnimationState::DoubleJump,
        AnimationState::Fall,
    ];

    /// Sheet file stem, e.g. `double_jump` for `double_jump.png`
    pub fn sheet_name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Run => "run",
            AnimationState::Jump => "jump",
            AnimationState::DoubleJump => "double_jump",
            AnimationState::Fall => "fall",
        }
    }

    pub fn sheet_names() -> [&'static str; 5] {
        Self::ALL.map(|s| s.sheet_name())
    }

    /// Full sheet key including facing, e.g. `run_left`
    pub fn sheet_key(&self, facing: Facing) -> String {
        SpriteSheets::directional_key(self.sheet_name(), facing)
    }
}

/// Pick the animation for the current motion.
///
/// Rising shows the jump sheet matching the jump number; falling faster
/// than `fall_threshold` shows the fall sheet; otherwise running or idle.
pub fn select_animation(x_velocity: f32, y_velocity: f32, jump_count: u32, fall_threshold: f32) -> AnimationState {
    if y_velocity < 0.0 {
        match jump_count {
            1 => AnimationState::Jump,
            2 => AnimationState::DoubleJump,
            _ => AnimationState::Idle,
        }
    } else if y_velocity > fall_threshold {
        AnimationState::Fall
    } else if x_velocity != 0.0 {
        AnimationState::Run
    } else {
        AnimationState::Idle
    }
}

/// Frame index for an animation counter
pub fn frame_index(animation_count: u32, animation_delay: u32, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    (animation_count / animation_delay.max(1)) as usize % frame_count
}
