//! Sprite sheet slicing
//!
//! Character sheets are a single row of fixed-size frames. Every frame is
//! scaled 2x (nearest neighbour, for crisp pixel art) and paired with its
//! collision mask. Directional sheets are stored twice, once per facing.

use std::collections::HashMap;
use image::{imageops, ImageFormat, Rgba, RgbaImage};
use super::Mask;

/// One animation frame: pixels plus collision mask
#[derive(Debug, Clone)]
pub struct SpriteFrame {
    pub image: RgbaImage,
    pub mask: Mask,
}

impl SpriteFrame {
    pub fn new(image: RgbaImage) -> Self {
        let mask = Mask::from_rgba(&image);
        Self { image, mask }
    }

    /// Solid rectangle of a single colour
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        let image = RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]));
        Self::new(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Mirror left-to-right
    pub fn flipped(&self) -> Self {
        Self::new(imageops::flip_horizontal(&self.image))
    }
}

/// Decode PNG bytes into RGBA pixels
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8())
}

/// Double the size of an image without smoothing
pub fn scale2x(image: &RgbaImage) -> RgbaImage {
    imageops::resize(image, image.width() * 2, image.height() * 2, imageops::FilterType::Nearest)
}

/// Copy a `width x height` region onto a transparent canvas of that size.
/// Parts of the region that fall outside the source stay transparent.
pub fn crop(image: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    if x < image.width() && y < image.height() {
        let w = width.min(image.width() - x);
        let h = height.min(image.height() - y);
        let region = imageops::crop_imm(image, x, y, w, h).to_image();
        imageops::replace(&mut canvas, &region, 0, 0);
    }
    canvas
}

/// Cut a horizontal strip into frames, scaling each 2x
pub fn slice_sheet(sheet: &RgbaImage, frame_width: u32, frame_height: u32) -> Vec<SpriteFrame> {
    if frame_width == 0 || frame_height == 0 {
        return Vec::new();
    }
    (0..sheet.width() / frame_width)
        .map(|i| {
            let frame = crop(sheet, i * frame_width, 0, frame_width, frame_height);
            SpriteFrame::new(scale2x(&frame))
        })
        .collect()
}

/// Build the terrain block image: the `size / 2` tile at `origin`, scaled 2x
pub fn terrain_tile(terrain: &RgbaImage, origin: (u32, u32), size: u32) -> SpriteFrame {
    let half = (size / 2).max(1);
    let tile = crop(terrain, origin.0, origin.1, half, half);
    SpriteFrame::new(scale2x(&tile))
}

/// Which way a sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn suffix(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Named collections of animation frames
#[derive(Debug, Clone, Default)]
pub struct SpriteSheets {
    sheets: HashMap<String, Vec<SpriteFrame>>,
}

impl SpriteSheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key a directional sheet is stored under, e.g. `run_left`
    pub fn directional_key(name: &str, facing: Facing) -> String {
        format!("{}_{}", name, facing.suffix())
    }

    /// Store a sheet as-is
    pub fn insert(&mut self, name: impl Into<String>, frames: Vec<SpriteFrame>) {
        self.sheets.insert(name.into(), frames);
    }

    /// Store right-facing frames under `name_right` and mirrored copies under `name_left`
    pub fn insert_directional(&mut self, name: &str, frames: Vec<SpriteFrame>) {
        let left = frames.iter().map(SpriteFrame::flipped).collect();
        self.sheets.insert(Self::directional_key(name, Facing::Left), left);
        self.sheets.insert(Self::directional_key(name, Facing::Right), frames);
    }

    /// Frames for a sheet; empty sheets count as missing
    pub fn get(&self, name: &str) -> Option<&[SpriteFrame]> {
        self.sheets
            .get(name)
            .map(|v| v.as_slice())
            .filter(|frames| !frames.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<SpriteFrame>)> {
        self.sheets.iter()
    }

    /// Single-frame solid sheets for every named animation, in both facings
    pub fn placeholder(names: &[&str], width: u32, height: u32, color: [u8; 3]) -> Self {
        let mut sheets = Self::new();
        for name in names {
            sheets.insert_directional(name, vec![SpriteFrame::solid(width, height, color)]);
        }
        sheets
    }
}
