//! Platformer: a side-scrolling pixel-art platformer
//!
//! Run left and right, jump and double jump across terrain blocks while the
//! camera follows. Art is loaded from the Pixel Adventure asset layout;
//! anything missing is replaced by coloured placeholders.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod config;
mod game;
mod geom;
mod input;
mod level;
mod render;
mod sprite;

use std::sync::OnceLock;
use macroquad::prelude::*;
use config::{GameConfig, DEFAULT_CONFIG_PATH};
use game::{FrameClock, GameEvent, GameState};
use input::{Action, InputState};
use render::Renderer;

/// Loaded once, before the window opens, since the window size comes from it
fn startup_config() -> &'static GameConfig {
    static CONFIG: OnceLock<GameConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        GameConfig::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            log::warn!("Ignoring {}: {}", DEFAULT_CONFIG_PATH, e);
            GameConfig::default()
        })
    })
}

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        if let Err(e) = env_logger::Builder::from_env(env).try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        }
    }
}

fn window_conf() -> Conf {
    init_logging();
    let window = &startup_config().window;
    Conf {
        window_title: window.title.clone(),
        window_width: window.width,
        window_height: window.height,
        window_resizable: false,
        high_dpi: false,
        ..Default::default()
    }
}

/// Write the running level to `<asset root>/levels/exported.ron`
#[cfg(not(target_arch = "wasm32"))]
fn export_level(game: &GameState) {
    let path = std::path::Path::new(&game.config.assets.root).join("levels/exported.ron");
    match level::save_level(&game.level, &path) {
        Ok(()) => log::info!("Exported level to {}", path.display()),
        Err(e) => log::warn!("Could not export level: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn export_level(_game: &GameState) {
    log::warn!("Level export needs a filesystem");
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Jumped { count: 2 } => log::debug!("double jump"),
        GameEvent::Jumped { count } => log::debug!("jump {}", count),
        GameEvent::Landed { speed } => log::debug!("landed at {:.1} px/tick", speed),
        GameEvent::Bonked => log::debug!("hit head"),
        GameEvent::Respawned { from } => log::info!("respawned after falling to y={}", from.y),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    log::info!("Platformer v{}", VERSION);

    let config = startup_config().clone();
    let assets = assets::load_all(&config).await;
    let mut clock = FrameClock::new(config.window.fps);
    let mut game = GameState::new(config, assets.level, assets.sprites, assets.terrain);
    let mut renderer = Renderer::new(&game, assets.background.as_ref());
    let mut input = InputState::new();

    loop {
        input.poll();

        if input.action_pressed(Action::Quit) {
            log::info!("Quit requested");
            break;
        }
        if input.action_pressed(Action::ToggleDebug) {
            renderer.toggle_debug();
        }
        if input.action_pressed(Action::Reset) {
            log::info!("Reset to level start");
            game.reset();
        }
        if input.action_pressed(Action::ExportLevel) {
            export_level(&game);
        }

        game.run_frame(&mut clock, get_frame_time() as f64, input.frame_input());
        for event in game.events.drain() {
            log_event(&event);
        }

        renderer.draw(&game, input.has_gamepad());

        next_frame().await;
    }
}
