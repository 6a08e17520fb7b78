//! Drawing
//!
//! Sprite frames live in CPU memory as `RgbaImage`s; they are uploaded to
//! GPU textures once when the renderer is built and looked up by sheet key
//! and frame index every frame after that.

use std::collections::HashMap;
use image::RgbaImage;
use macroquad::prelude::*;
use crate::game::GameState;
use crate::sprite::SpriteFrame;

const CLEAR_COLOR: Color = Color::new(0.53, 0.75, 0.92, 1.0);
const TERRAIN_FALLBACK: Color = Color::new(0.35, 0.63, 0.24, 1.0);
const OVERLAY_BG: Color = Color::new(0.0, 0.0, 0.0, 0.6);
const OVERLAY_TEXT: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const OVERLAY_FONT_SIZE: f32 = 18.0;

/// Texture dimensions for an image, None if either side exceeds `u16`
pub fn texture_size(width: u32, height: u32) -> Option<(u16, u16)> {
    Some((u16::try_from(width).ok()?, u16::try_from(height).ok()?))
}

fn upload(image: &RgbaImage) -> Option<Texture2D> {
    let Some((w, h)) = texture_size(image.width(), image.height()) else {
        log::warn!("{}x{} image is too large for a texture, skipping", image.width(), image.height());
        return None;
    };
    let texture = Texture2D::from_rgba8(w, h, image.as_raw());
    texture.set_filter(FilterMode::Nearest);
    Some(texture)
}

/// All frames or nothing, so frame indices stay aligned with the sheet
fn upload_frames(frames: &[SpriteFrame]) -> Option<Vec<Texture2D>> {
    frames.iter().map(|f| upload(&f.image)).collect()
}

/// Top-left corners of the background tiles covering the window
pub fn background_tiles(screen_w: i32, screen_h: i32, tile_w: i32, tile_h: i32) -> Vec<(i32, i32)> {
    if tile_w <= 0 || tile_h <= 0 {
        return Vec::new();
    }
    let mut tiles = Vec::new();
    for i in 0..screen_w / tile_w + 1 {
        for j in 0..screen_h / tile_h + 1 {
            tiles.push((i * tile_w, j * tile_h));
        }
    }
    tiles
}

/// Text lines of the debug overlay
pub fn debug_lines(game: &GameState, fps: i32, has_gamepad: bool) -> Vec<String> {
    let player = &game.player;
    vec![
        format!("fps {}  tick {}", fps, game.tick_count),
        format!("pos ({}, {})  size {}x{}", player.rect.x, player.rect.y, player.rect.w, player.rect.h),
        format!("vel ({:.0}, {:.2})", player.x_velocity, player.y_velocity),
        format!(
            "jumps {}/{}  fall {}  {}",
            player.jump_count,
            game.config.player.max_jumps,
            player.fall_count,
            if game.is_grounded() { "grounded" } else { "airborne" }
        ),
        format!("anim {}_{}", player.animation.sheet_name(), player.direction.suffix()),
        format!("camera {}", game.camera.offset_x),
        format!("gamepad {}", if has_gamepad { "yes" } else { "no" }),
    ]
}

/// GPU-side copies of all game images
pub struct Renderer {
    sheets: HashMap<String, Vec<Texture2D>>,
    /// None draws blocks as flat rectangles
    terrain: Option<Texture2D>,
    background: Option<Texture2D>,
    /// Overlay visibility, toggled with F1
    pub show_debug: bool,
}

impl Renderer {
    pub fn new(game: &GameState, background: Option<&RgbaImage>) -> Self {
        let sheets = game
            .sprites
            .iter()
            .filter_map(|(name, frames)| Some((name.clone(), upload_frames(frames)?)))
            .collect();
        Self {
            sheets,
            terrain: upload(&game.terrain.image),
            background: background.and_then(upload),
            show_debug: false,
        }
    }

    pub fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
        log::debug!("debug overlay {}", if self.show_debug { "on" } else { "off" });
    }

    /// Draw one frame: background, terrain, player, overlay
    pub fn draw(&self, game: &GameState, has_gamepad: bool) {
        clear_background(CLEAR_COLOR);
        self.draw_background(game);
        self.draw_blocks(game);
        self.draw_player(game);
        if self.show_debug {
            self.draw_overlay(game, has_gamepad);
        }
    }

    fn draw_background(&self, game: &GameState) {
        let Some(texture) = &self.background else { return };
        let window = &game.config.window;
        let (w, h) = (texture.width() as i32, texture.height() as i32);
        for (x, y) in background_tiles(window.width, window.height, w, h) {
            draw_texture(texture, x as f32, y as f32, WHITE);
        }
    }

    fn draw_blocks(&self, game: &GameState) {
        let screen_w = game.config.window.width;
        for block in &game.blocks {
            let x = game.camera.to_screen(block.rect.x);
            if x + block.rect.w < 0 || x > screen_w {
                continue;
            }
            let (x, y) = (x as f32, block.rect.y as f32);
            let (w, h) = (block.rect.w as f32, block.rect.h as f32);
            match &self.terrain {
                Some(texture) => draw_texture_ex(
                    texture,
                    x,
                    y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(w, h)),
                        ..Default::default()
                    },
                ),
                None => draw_rectangle(x, y, w, h, TERRAIN_FALLBACK),
            }
        }
    }

    fn draw_player(&self, game: &GameState) {
        let player = &game.player;
        let x = game.camera.to_screen(player.rect.x) as f32;
        let y = player.rect.y as f32;

        let texture = player.sprite.and_then(|sprite| {
            self.sheets
                .get(&sprite.animation.sheet_key(sprite.facing))?
                .get(sprite.index)
        });
        match texture {
            Some(texture) => draw_texture(texture, x, y, WHITE),
            None => {
                let [r, g, b] = game.config.assets.placeholder_color;
                draw_rectangle(x, y, player.rect.w as f32, player.rect.h as f32, Color::from_rgba(r, g, b, 255));
            }
        }
    }

    fn draw_overlay(&self, game: &GameState, has_gamepad: bool) {
        let lines = debug_lines(game, get_fps(), has_gamepad);
        let line_h = OVERLAY_FONT_SIZE + 2.0;
        let width = lines
            .iter()
            .map(|l| measure_text(l, None, OVERLAY_FONT_SIZE as u16, 1.0).width)
            .fold(0.0, f32::max);

        draw_rectangle(8.0, 8.0, width + 16.0, line_h * lines.len() as f32 + 12.0, OVERLAY_BG);
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 16.0, 8.0 + line_h * (i as f32 + 1.0), OVERLAY_FONT_SIZE, OVERLAY_TEXT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_covers_window() {
        let tiles = background_tiles(1000, 800, 64, 64);
        // 1000 / 64 + 1 columns, 800 / 64 + 1 rows
        assert_eq!(tiles.len(), 16 * 13);
        assert_eq!(tiles[0], (0, 0));
        assert_eq!(tiles[1], (0, 64));
        assert_eq!(*tiles.last().unwrap(), (960, 768));
        assert!(background_tiles(1000, 800, 0, 64).is_empty());
    }

    #[test]
    fn test_texture_size_limits() {
        assert_eq!(texture_size(64, 32), Some((64, 32)));
        assert_eq!(texture_size(65535, 1), Some((65535, 1)));
        assert_eq!(texture_size(65536, 32), None);
        assert_eq!(texture_size(32, 70000), None);
    }

    #[test]
    fn test_debug_lines() {
        let mut game = GameState::default();
        game.tick(Default::default());
        let lines = debug_lines(&game, 60, false);
        assert_eq!(lines[0], "fps 60  tick 1");
        assert_eq!(lines[1], "pos (100, 100)  size 64x64");
        // Still at the spawn point, high above the floor
        assert!(lines[3].starts_with("jumps 0/2"));
        assert!(lines[3].ends_with("airborne"));
        assert_eq!(lines[4], "anim idle_left");
        assert_eq!(lines[6], "gamepad no");
    }
}
