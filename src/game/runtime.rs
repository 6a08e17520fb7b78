//! Game Runtime
//!
//! Owns the whole simulation state and advances it one fixed tick at a time.
//! Nothing here touches the window, so the game can be driven from tests
//! with synthetic input.

use crate::config::GameConfig;
use crate::level::{Block, Level};
use crate::sprite::{SpriteFrame, SpriteSheets};
use super::camera::Camera;
use super::collision::{probe_horizontal, resolve_vertical, Terrain};
use super::event::{EventQueue, GameEvent};
use super::player::Player;

/// Player intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Left held
    pub left: bool,
    /// Right held
    pub right: bool,
    /// Jump pressed since the previous tick
    pub jump: bool,
}

/// Fixed-timestep accumulator
///
/// Rendering runs at whatever rate the display allows; the simulation always
/// advances in steps of `1 / fps` seconds so movement speed is frame-rate
/// independent.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f64,
    accumulator: f64,
    /// Cap on ticks per rendered frame, so a long stall doesn't fast-forward the game
    max_steps: u32,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            step: 1.0 / fps.max(1) as f64,
            accumulator: 0.0,
            max_steps: 5,
        }
    }

    /// Target frame time in seconds
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Add elapsed seconds, return how many ticks to run now
    pub fn advance(&mut self, delta: f64) -> u32 {
        if delta.is_finite() && delta > 0.0 {
            self.accumulator += delta;
        }
        let due = (self.accumulator / self.step).floor() as u32;
        let steps = due.min(self.max_steps);
        self.accumulator -= steps as f64 * self.step;
        if due > self.max_steps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

/// Complete simulation state
pub struct GameState {
    pub config: GameConfig,
    pub level: Level,
    pub blocks: Vec<Block>,
    pub sprites: SpriteSheets,
    /// Terrain tile, sized to `config.block_size`
    pub terrain: SpriteFrame,
    pub player: Player,
    pub camera: Camera,
    pub events: EventQueue<GameEvent>,
    /// Ticks simulated since start or last reset
    pub tick_count: u64,
    /// Jump pressed during a rendered frame that hasn't been simulated yet
    queued_jump: bool,
}

impl GameState {
    pub fn new(config: GameConfig, level: Level, sprites: SpriteSheets, terrain: SpriteFrame) -> Self {
        let blocks = level.build_blocks();
        let player = Self::spawn_player(&config, &level);
        log::info!(
            "Game ready: {} blocks, player at {:?}, {} sprite sheets",
            blocks.len(),
            level.player_start,
            sprites.len()
        );
        Self {
            config,
            level,
            blocks,
            sprites,
            terrain,
            player,
            camera: Camera::new(),
            events: EventQueue::new(),
            tick_count: 0,
            queued_jump: false,
        }
    }

    fn spawn_player(config: &GameConfig, level: &Level) -> Player {
        let (x, y) = level.player_start;
        Player::new(x, y, config.player.start_width, config.player.start_height)
    }

    /// Put the player back at the start and recentre the camera
    pub fn reset(&mut self) {
        self.player = Self::spawn_player(&self.config, &self.level);
        self.camera = Camera::new();
        self.queued_jump = false;
        self.tick_count = 0;
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, input: FrameInput) {
        let settings = &self.config.player;

        if input.jump && self.player.can_jump(settings) {
            self.player.jump(settings);
            self.events.send(GameEvent::Jumped { count: self.player.jump_count });
            log::debug!("jump {} at {:?}", self.player.jump_count, self.player.rect);
        }

        self.player.apply_physics(settings, self.config.window.fps, &self.sprites);
        self.handle_movement(input);

        self.camera.follow(
            &self.player.rect,
            self.player.x_velocity,
            self.config.window.width,
            self.config.camera.scroll_area_width,
        );

        let kill_plane = self.config.window.height + self.config.player.respawn_below;
        if self.player.rect.top() > kill_plane {
            let from = self.player.rect;
            self.reset();
            self.events.send(GameEvent::Respawned { from });
            log::info!("Player fell out of the world at {:?}, respawning", from);
        }

        self.tick_count += 1;
    }

    /// Steer from input (blocked sides are ignored), then settle vertically
    fn handle_movement(&mut self, input: FrameInput) {
        let settings = &self.config.player;
        let terrain = Terrain {
            blocks: &self.blocks,
            tile_mask: Some(&self.terrain.mask),
        };
        let player = &mut self.player;

        player.x_velocity = 0.0;
        let probe = settings.probe_distance();
        let blocked_left = probe_horizontal(player, &self.sprites, &terrain, -probe).is_some();
        let blocked_right = probe_horizontal(player, &self.sprites, &terrain, probe).is_some();

        if input.left && !blocked_left {
            player.move_left(settings.velocity);
        }
        if input.right && !blocked_right {
            player.move_right(settings.velocity);
        }

        let dy = player.y_velocity;
        let was_jumping = player.jump_count > 0;
        let hits = resolve_vertical(player, &self.sprites, &terrain, dy);
        if hits.is_empty() {
            return;
        }
        if dy > 0.0 && (was_jumping || dy > settings.fall_threshold()) {
            self.events.send(GameEvent::Landed { speed: dy });
            log::debug!("landed at {:?} (speed {:.2})", player.rect, dy);
        } else if dy < 0.0 {
            self.events.send(GameEvent::Bonked);
            log::debug!("bonked at {:?}", player.rect);
        }
    }

    /// Run as many ticks as the elapsed time calls for.
    /// A jump press is held over until a tick actually consumes it.
    pub fn run_frame(&mut self, clock: &mut FrameClock, delta: f64, input: FrameInput) -> u32 {
        self.queued_jump |= input.jump;
        let steps = clock.advance(delta);
        for _ in 0..steps {
            let jump = std::mem::take(&mut self.queued_jump);
            self.tick(FrameInput { jump, ..input });
        }
        steps
    }

    /// True while the player is touching ground directly below
    pub fn is_grounded(&self) -> bool {
        let terrain = Terrain {
            blocks: &self.blocks,
            tile_mask: Some(&self.terrain.mask),
        };
        let mut player = self.player.clone();
        super::collision::probe(&mut player, &self.sprites, &terrain, 0, 1).is_some()
    }
}

impl Default for GameState {
    /// Built-in level with placeholder art
    fn default() -> Self {
        let config = GameConfig::default();
        let level = Level::default_layout(&config);
        let sprites = crate::assets::placeholder_sprites(&config);
        let terrain = crate::assets::placeholder_terrain(&config);
        Self::new(config, level, sprites, terrain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::BlockSpec;
    use crate::sprite::Facing;
    use crate::game::AnimationState;

    const IDLE: FrameInput = FrameInput { left: false, right: false, jump: false };
    const LEFT: FrameInput = FrameInput { left: true, right: false, jump: false };
    const RIGHT: FrameInput = FrameInput { left: false, right: true, jump: false };
    const JUMP: FrameInput = FrameInput { left: false, right: false, jump: true };

    fn run(game: &mut GameState, input: FrameInput, ticks: usize) -> Vec<GameEvent> {
        for _ in 0..ticks {
            game.tick(input);
        }
        game.events.drain().collect()
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    /// Default level with the player already standing on the floor
    fn settled(start: (i32, i32)) -> GameState {
        let mut game = GameState::default();
        game.level.player_start = start;
        game.reset();
        run(&mut game, IDLE, 200);
        game
    }

    #[test]
    fn test_falls_and_lands_on_floor() {
        let mut game = GameState::default();
        let events = run(&mut game, IDLE, 300);

        assert_eq!(game.player.rect.bottom(), 704);
        assert_eq!(game.player.rect.x, 100);
        assert_eq!(game.player.jump_count, 0);
        // One real landing; resting contact afterwards is silent
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Landed { .. })), 1);
        assert_eq!(game.player.animation, AnimationState::Idle);
        assert!(game.is_grounded());
    }

    #[test]
    fn test_double_jump_limit() {
        let mut game = settled((100, 100));

        let events = run(&mut game, JUMP, 1);
        assert_eq!(events, vec![GameEvent::Jumped { count: 1 }]);
        assert_eq!(game.player.animation, AnimationState::Jump);
        assert!(game.player.rect.bottom() < 704);

        run(&mut game, IDLE, 5);
        let events = run(&mut game, JUMP, 1);
        assert_eq!(events, vec![GameEvent::Jumped { count: 2 }]);
        assert_eq!(game.player.animation, AnimationState::DoubleJump);

        // A third press in mid-air does nothing
        run(&mut game, IDLE, 3);
        let events = run(&mut game, JUMP, 1);
        assert!(events.is_empty());
        assert_eq!(game.player.jump_count, 2);

        // Back on the ground the jumps are refilled
        let events = run(&mut game, IDLE, 200);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Landed { .. })), 1);
        assert_eq!(game.player.jump_count, 0);
        assert_eq!(game.player.rect.bottom(), 704);
    }

    #[test]
    fn test_raised_step_blocks_walking_left() {
        let mut game = settled((100, 100));

        run(&mut game, LEFT, 50);
        assert_eq!(game.player.rect.x, 100);
        assert_eq!(game.player.x_velocity, 0.0);
        assert_eq!(game.camera.offset_x, 0);
    }

    #[test]
    fn test_walking_right_scrolls_camera() {
        let mut game = settled((100, 100));

        for _ in 0..300 {
            game.tick(RIGHT);
            assert_eq!(game.player.rect.bottom(), 704);
        }
        assert_eq!(game.player.direction, Facing::Right);
        assert!(game.player.rect.x > 1000);
        assert!(game.camera.offset_x > 0);

        let screen_right = game.camera.to_screen(game.player.rect.right());
        assert!((790..=815).contains(&screen_right), "screen right {}", screen_right);
    }

    #[test]
    fn test_turning_left_from_the_scroll_band_does_not_scroll() {
        let mut game = settled((100, 100));
        run(&mut game, RIGHT, 300);
        let offset = game.camera.offset_x;

        // Walking back left only scrolls once the player reaches the left band
        run(&mut game, LEFT, 20);
        assert_eq!(game.camera.offset_x, offset);
        assert_eq!(game.player.direction, Facing::Left);
    }

    #[test]
    fn test_head_bump_under_floating_block() {
        // Floating block spans x 288..384, its underside is at y 512
        let mut game = settled((300, 530));
        assert_eq!(game.player.rect.bottom(), 704);

        game.tick(JUMP);
        let mut highest = game.player.rect.top();
        for _ in 0..60 {
            game.tick(IDLE);
            highest = highest.min(game.player.rect.top());
        }
        let events: Vec<_> = game.events.drain().collect();

        assert_eq!(count(&events, |e| matches!(e, GameEvent::Bonked)), 1);
        assert_eq!(highest, 512);
        assert_eq!(game.player.rect.bottom(), 704);
    }

    #[test]
    fn test_respawn_after_falling_out() {
        let config = GameConfig::default();
        let level = Level {
            name: "void".to_string(),
            player_start: (0, 0),
            blocks: vec![BlockSpec::new(1000, 0, 96)],
        };
        let sprites = SpriteSheets::placeholder(&AnimationState::sheet_names(), 64, 64, [255, 0, 0]);
        let mut game = GameState::new(config, level, sprites, SpriteFrame::solid(96, 96, [0, 0, 0]));

        let mut respawned = false;
        for _ in 0..500 {
            game.tick(IDLE);
            if game.events.drain().any(|e| matches!(e, GameEvent::Respawned { .. })) {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert_eq!((game.player.rect.x, game.player.rect.y), (0, 0));
        assert_eq!(game.camera.offset_x, 0);
    }

    #[test]
    fn test_queued_jump_survives_frames_without_ticks() {
        let mut game = GameState::default();
        let mut clock = FrameClock::new(60);
        let step = clock.step();

        assert_eq!(game.run_frame(&mut clock, 0.0, JUMP), 0);
        assert_eq!(game.events.drain().count(), 0);

        assert_eq!(game.run_frame(&mut clock, step, IDLE), 1);
        let events: Vec<_> = game.events.drain().collect();
        assert_eq!(events, vec![GameEvent::Jumped { count: 1 }]);

        // The press is consumed exactly once
        game.run_frame(&mut clock, step * 2.0, IDLE);
        assert!(game.events.drain().all(|e| !matches!(e, GameEvent::Jumped { .. })));
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(clock.step()), 1);
        assert_eq!(clock.advance(clock.step() * 0.5), 0);
        assert_eq!(clock.advance(clock.step() * 0.5), 1);

        // Long stall is capped and the backlog dropped
        assert_eq!(clock.advance(10.0), 5);
        assert!(clock.advance(0.0) <= 1);

        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
    }
}
