//! Asset loading
//!
//! Art follows the Pixel Adventure layout under the asset root:
//! - `MainCharacters/<character>/*.png` one horizontal strip per animation,
//!   listed in a `manifest.txt` generated at build time
//! - `Terrain/Terrain.png` tile atlas
//! - `Background/<name>.png`
//!
//! Everything goes through `macroquad::file::load_file`, so the same code
//! works from the filesystem and over HTTP on WASM. Failures are reported
//! as `AssetError`; `load_all` turns them into placeholders.

use image::RgbaImage;
use thiserror::Error;
use crate::config::GameConfig;
use crate::game::AnimationState;
use crate::level::{Level, LevelError};
#[cfg(not(target_arch = "wasm32"))]
use crate::level::load_level;
#[cfg(target_arch = "wasm32")]
use crate::level::parse_level;
use crate::sprite::{decode_png, slice_sheet, terrain_tile, SpriteFrame, SpriteSheets};

/// Name of the per-character file listing, written by build.rs
pub const MANIFEST_FILE: &str = "manifest.txt";

/// Colour of the placeholder terrain block
const PLACEHOLDER_TERRAIN: [u8; 3] = [90, 160, 60];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load {path}: {message}")]
    Load { path: String, message: String },
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Character '{0}' has no sprite sheets")]
    NoSheets(String),
    #[error("Character '{0}' has no idle animation")]
    MissingIdle(String),
    #[error("Terrain tile at {origin:?} is fully transparent")]
    EmptyTerrain { origin: (u32, u32) },
    #[error("Level error in {path}: {source}")]
    Level {
        path: String,
        #[source]
        source: LevelError,
    },
}

/// Everything the game needs from disk
pub struct LoadedAssets {
    pub sprites: SpriteSheets,
    pub terrain: SpriteFrame,
    /// None draws a flat clear colour instead
    pub background: Option<RgbaImage>,
    pub level: Level,
}

fn asset_path(config: &GameConfig, parts: &[&str]) -> String {
    let mut path = config.assets.root.trim_end_matches('/').to_string();
    for part in parts {
        path.push('/');
        path.push_str(part);
    }
    path
}

async fn load_bytes(path: &str) -> Result<Vec<u8>, AssetError> {
    macroquad::file::load_file(path).await.map_err(|e| AssetError::Load {
        path: path.to_string(),
        message: e.to_string(),
    })
}

async fn load_png(path: &str) -> Result<RgbaImage, AssetError> {
    let bytes = load_bytes(path).await?;
    decode_png(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_string(),
        source,
    })
}

/// PNG file names listed in a manifest, in order
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.to_ascii_lowercase().ends_with(".png"))
        .map(str::to_string)
        .collect()
}

/// Slice every strip and store it in both facings, keyed by file stem.
/// The idle sheet is required since every other state falls back to it.
pub fn build_character(
    character: &str,
    strips: Vec<(String, RgbaImage)>,
    frame_width: u32,
    frame_height: u32,
) -> Result<SpriteSheets, AssetError> {
    let mut sheets = SpriteSheets::new();
    for (file, strip) in strips {
        let name = file
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&file);
        let frames = slice_sheet(&strip, frame_width, frame_height);
        if frames.is_empty() {
            log::warn!("{}/{} is narrower than one frame, skipping", character, file);
            continue;
        }
        log::debug!("{}: {} frames", name, frames.len());
        sheets.insert_directional(name, frames);
    }

    if sheets.is_empty() {
        return Err(AssetError::NoSheets(character.to_string()));
    }
    if !sheets.contains(&AnimationState::Idle.sheet_key(Default::default())) {
        return Err(AssetError::MissingIdle(character.to_string()));
    }
    Ok(sheets)
}

/// Load all animation strips of the configured character
pub async fn load_character(config: &GameConfig) -> Result<SpriteSheets, AssetError> {
    let character = &config.assets.character;
    let manifest_path = asset_path(config, &["MainCharacters", character, MANIFEST_FILE]);
    let manifest = load_bytes(&manifest_path).await?;
    let files = parse_manifest(&String::from_utf8_lossy(&manifest));

    let mut strips = Vec::with_capacity(files.len());
    for file in files {
        let path = asset_path(config, &["MainCharacters", character, &file]);
        strips.push((file, load_png(&path).await?));
    }

    let sheets = build_character(character, strips, config.assets.frame_width, config.assets.frame_height)?;
    log::info!("Loaded character '{}' ({} sheets)", character, sheets.len());
    Ok(sheets)
}

/// Cut the block tile out of the terrain atlas.
/// A tile with no solid pixels would make every block intangible.
pub fn terrain_from_atlas(atlas: &RgbaImage, config: &GameConfig) -> Result<SpriteFrame, AssetError> {
    let origin = config.assets.terrain_origin;
    let tile = terrain_tile(atlas, origin, config.block_size as u32);
    if tile.mask.count() == 0 {
        return Err(AssetError::EmptyTerrain { origin });
    }
    Ok(tile)
}

/// Load the terrain block image
pub async fn load_terrain(config: &GameConfig) -> Result<SpriteFrame, AssetError> {
    let atlas = load_png(&asset_path(config, &["Terrain", "Terrain.png"])).await?;
    terrain_from_atlas(&atlas, config)
}

/// Load the background tile
pub async fn load_background(config: &GameConfig) -> Result<RgbaImage, AssetError> {
    load_png(&asset_path(config, &["Background", &config.assets.background])).await
}

/// Path of the configured level file, if any
fn level_path(config: &GameConfig) -> Option<String> {
    let file = config.assets.level.as_deref()?;
    Some(asset_path(config, &[file]))
}

/// Resolve the level to play: the configured level file, or the built-in
/// layout when none is set
pub async fn fetch_level(config: &GameConfig) -> Result<Level, AssetError> {
    let Some(path) = level_path(config) else {
        return Ok(Level::default_layout(config));
    };

    #[cfg(not(target_arch = "wasm32"))]
    {
        load_level(&path).map_err(|source| AssetError::Level { path, source })
    }

    #[cfg(target_arch = "wasm32")]
    {
        let bytes = load_bytes(&path).await?;
        let level = parse_level(&String::from_utf8_lossy(&bytes))
            .map_err(|source| AssetError::Level { path: path.clone(), source })?;
        log::info!("Loaded level '{}' ({} blocks) from {}", level.name, level.blocks.len(), path);
        Ok(level)
    }
}

/// Placeholder character: one solid frame per animation
pub fn placeholder_sprites(config: &GameConfig) -> SpriteSheets {
    SpriteSheets::placeholder(
        &AnimationState::sheet_names(),
        config.assets.frame_width * 2,
        config.assets.frame_height * 2,
        config.assets.placeholder_color,
    )
}

/// Placeholder terrain: a solid block
pub fn placeholder_terrain(config: &GameConfig) -> SpriteFrame {
    let size = config.block_size as u32;
    SpriteFrame::solid(size, size, PLACEHOLDER_TERRAIN)
}

/// Load everything, substituting placeholders for anything that fails
pub async fn load_all(config: &GameConfig) -> LoadedAssets {
    let sprites = load_character(config).await.unwrap_or_else(|e| {
        log::warn!("{}; using placeholder player", e);
        placeholder_sprites(config)
    });
    let terrain = load_terrain(config).await.unwrap_or_else(|e| {
        log::warn!("{}; using placeholder terrain", e);
        placeholder_terrain(config)
    });
    let background = match load_background(config).await {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("{}; drawing without background", e);
            None
        }
    };
    let level = fetch_level(config).await.unwrap_or_else(|e| {
        log::warn!("{}; using built-in level", e);
        Level::default_layout(config)
    });

    LoadedAssets {
        sprites,
        terrain,
        background,
        level,
    }
}
