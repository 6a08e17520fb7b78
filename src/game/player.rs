//! The player character
//!
//! Position is an integer rectangle; velocity is fractional and truncated
//! when applied, so slow gravity builds up over several ticks before the
//! player actually moves.

use crate::config::PlayerSettings;
use crate::geom::Rect;
use crate::sprite::{Facing, Mask, SpriteFrame, SpriteSheets};
use super::animation::{frame_index, select_animation, AnimationState};

/// Which frame of which sheet the player currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRef {
    pub animation: AnimationState,
    pub facing: Facing,
    pub index: usize,
}

impl SpriteRef {
    pub fn frame<'a>(&self, sheets: &'a SpriteSheets) -> Option<&'a SpriteFrame> {
        sheets.get(&self.animation.sheet_key(self.facing))?.get(self.index)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub x_velocity: f32,
    pub y_velocity: f32,
    pub direction: Facing,
    /// Ticks since the current animation started
    pub animation_count: u32,
    /// Ticks since the player last stood on something (drives gravity)
    pub fall_count: u32,
    /// Jumps used since last landing
    pub jump_count: u32,
    pub animation: AnimationState,
    /// None until the first sprite update
    pub sprite: Option<SpriteRef>,
}

impl Player {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            x_velocity: 0.0,
            y_velocity: 0.0,
            direction: Facing::Left,
            animation_count: 0,
            fall_count: 0,
            jump_count: 0,
            animation: AnimationState::Idle,
            sprite: None,
        }
    }

    pub fn can_jump(&self, settings: &PlayerSettings) -> bool {
        self.jump_count < settings.max_jumps
    }

    /// Launch upwards. The first jump also restarts gravity build-up.
    pub fn jump(&mut self, settings: &PlayerSettings) {
        self.y_velocity = settings.jump_velocity();
        self.animation_count = 0;
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_count = 0;
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.rect.translate(dx, dy);
    }

    pub fn move_left(&mut self, velocity: i32) {
        self.x_velocity = -(velocity as f32);
        if self.direction != Facing::Left {
            self.direction = Facing::Left;
            self.animation_count = 0;
        }
    }

    pub fn move_right(&mut self, velocity: i32) {
        self.x_velocity = velocity as f32;
        if self.direction != Facing::Right {
            self.direction = Facing::Right;
            self.animation_count = 0;
        }
    }

    /// Per-tick update: accumulate gravity, move, advance the animation
    pub fn apply_physics(&mut self, settings: &PlayerSettings, fps: u32, sheets: &SpriteSheets) {
        let ramp = self.fall_count as f32 / fps.max(1) as f32 * settings.gravity;
        self.y_velocity += ramp.min(settings.gravity);
        self.move_by(self.x_velocity as i32, self.y_velocity as i32);
        self.fall_count += 1;
        self.update_sprite(settings, sheets);
    }

    /// Standing on something: stop falling and refill jumps
    pub fn landed(&mut self) {
        self.fall_count = 0;
        self.y_velocity = 0.0;
        self.jump_count = 0;
    }

    /// Bounce off a ceiling
    pub fn hit_head(&mut self) {
        self.y_velocity = -self.y_velocity;
    }

    /// Choose the sheet and frame for this tick and fit the collision box to it.
    /// A missing sheet falls back to idle; with no idle either the box is left alone.
    pub fn update_sprite(&mut self, settings: &PlayerSettings, sheets: &SpriteSheets) {
        let mut animation = select_animation(
            self.x_velocity,
            self.y_velocity,
            self.jump_count,
            settings.fall_threshold(),
        );
        if !sheets.contains(&animation.sheet_key(self.direction)) {
            animation = AnimationState::Idle;
        }
        self.animation = animation;

        let Some(frames) = sheets.get(&animation.sheet_key(self.direction)) else {
            self.sprite = None;
            return;
        };

        let index = frame_index(self.animation_count, settings.animation_delay, frames.len());
        let frame = &frames[index];
        // Idle never resets the counter
        self.animation_count = self.animation_count.wrapping_add(1);

        self.rect.w = frame.width() as i32;
        self.rect.h = frame.height() as i32;
        self.sprite = Some(SpriteRef {
            animation,
            facing: self.direction,
            index,
        });
    }

    /// Collision mask of the current frame
    pub fn mask<'a>(&self, sheets: &'a SpriteSheets) -> Option<&'a Mask> {
        self.sprite.and_then(|s| s.frame(sheets)).map(|f| &f.mask)
    }
}
