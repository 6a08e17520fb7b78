//! Game configuration
//!
//! All tuning constants live here so the feel of the game can be adjusted
//! without recompiling. Values are read from an optional RON file; any
//! field missing from the file keeps its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default location of the config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Window and frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// Simulation ticks per second
    pub fps: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Platformer Game".to_string(),
            width: 1000,
            height: 800,
            fps: 60,
        }
    }
}

/// Player movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Horizontal speed in pixels per tick
    pub velocity: i32,
    /// Maximum per-tick gravity increment
    pub gravity: f32,
    /// Jump velocity is `-gravity * jump_strength`
    pub jump_strength: f32,
    /// 2 allows a double jump
    pub max_jumps: u32,
    /// Ticks each animation frame stays on screen
    pub animation_delay: u32,
    /// Initial collision box before the first sprite is applied
    pub start_width: i32,
    pub start_height: i32,
    /// Respawn once the player's top is this far below the window bottom
    pub respawn_below: i32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            velocity: 5,
            gravity: 1.0,
            jump_strength: 8.0,
            max_jumps: 2,
            animation_delay: 3,
            start_width: 50,
            start_height: 50,
            respawn_below: 800,
        }
    }
}

impl PlayerSettings {
    pub fn jump_velocity(&self) -> f32 {
        -self.gravity * self.jump_strength
    }

    /// Downward speed above which the fall animation is shown
    pub fn fall_threshold(&self) -> f32 {
        self.gravity * 2.0
    }

    /// How far ahead the wall probe looks on each side
    pub fn probe_distance(&self) -> i32 {
        self.velocity * 2
    }
}

/// Camera scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Width of the band at each screen edge that triggers scrolling
    pub scroll_area_width: i32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { scroll_area_width: 200 }
    }
}

/// Where the art comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub root: String,
    /// Character folder under `MainCharacters/`
    pub character: String,
    /// Size of one frame in the source sheet (before 2x scaling)
    pub frame_width: u32,
    pub frame_height: u32,
    /// Image under `Background/`
    pub background: String,
    /// Top-left of the tile inside `Terrain/Terrain.png`
    pub terrain_origin: (u32, u32),
    /// Colour of the placeholder player when no sprites are found
    pub placeholder_color: [u8; 3],
    /// Optional RON level file; the built-in layout is used when absent
    pub level: Option<String>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: "assets".to_string(),
            character: "VirtualGuy".to_string(),
            frame_width: 32,
            frame_height: 32,
            background: "Blue.png".to_string(),
            terrain_origin: (96, 0),
            placeholder_color: [255, 0, 0],
            level: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowSettings,
    pub player: PlayerSettings,
    pub camera: CameraSettings,
    pub assets: AssetSettings,
    /// Edge length of a terrain block in pixels
    pub block_size: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            player: PlayerSettings::default(),
            camera: CameraSettings::default(),
            assets: AssetSettings::default(),
            block_size: 96,
        }
    }
}

impl GameConfig {
    /// Load configuration from a RON file. A missing file is not an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Validation(msg.to_string()));

        if self.window.width <= 0 || self.window.height <= 0 {
            return fail("window size must be positive");
        }
        if self.window.fps == 0 {
            return fail("fps must be at least 1");
        }
        if self.player.velocity <= 0 {
            return fail("player velocity must be positive");
        }
        if !(self.player.gravity.is_finite() && self.player.gravity > 0.0) {
            return fail("gravity must be a positive number");
        }
        if !self.player.jump_strength.is_finite() || self.player.jump_strength < 0.0 {
            return fail("jump strength must be a non-negative number");
        }
        if self.player.animation_delay == 0 {
            return fail("animation delay must be at least 1");
        }
        if self.player.start_width <= 0 || self.player.start_height <= 0 {
            return fail("player start size must be positive");
        }
        if self.block_size <= 0 || self.block_size % 2 != 0 {
            return fail("block size must be a positive even number");
        }
        if self.assets.frame_width == 0 || self.assets.frame_height == 0 {
            return fail("sprite frame size must be positive");
        }
        if self.camera.scroll_area_width < 0 || self.camera.scroll_area_width * 2 > self.window.width {
            return fail("scroll area must fit twice inside the window");
        }
        Ok(())
    }
}
