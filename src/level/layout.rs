//! Level layout types and the built-in starting level

use serde::{Deserialize, Serialize};
use crate::config::GameConfig;
use crate::geom::Rect;

/// A square terrain block as stored in a level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl BlockSpec {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self { x, y, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// A placed block in the running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub rect: Rect,
}

/// A complete level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    /// Top-left corner of the player's collision box at spawn
    pub player_start: (i32, i32),
    pub blocks: Vec<BlockSpec>,
}

impl Level {
    /// The built-in level: a floor spanning one screen to the left and two
    /// to the right of the origin, a raised step and a floating block.
    pub fn default_layout(config: &GameConfig) -> Self {
        let size = config.block_size;
        let width = config.window.width;
        let height = config.window.height;

        let mut blocks: Vec<BlockSpec> = ((-width).div_euclid(size)..(width * 2).div_euclid(size))
            .map(|i| BlockSpec::new(i * size, height - size, size))
            .collect();
        blocks.push(BlockSpec::new(0, height - size * 2, size));
        blocks.push(BlockSpec::new(size * 3, height - size * 4, size));

        Self {
            name: "default".to_string(),
            player_start: (100, 100),
            blocks,
        }
    }

    /// Materialise the blocks for collision and drawing
    pub fn build_blocks(&self) -> Vec<Block> {
        self.blocks.iter().map(|b| Block { rect: b.rect() }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let level = Level::default_layout(&GameConfig::default());

        // Floor covers block indices -11..20 (floor division of -1000 / 96)
        assert_eq!(level.blocks.len(), 31 + 2);
        assert_eq!(level.blocks[0], BlockSpec::new(-11 * 96, 704, 96));
        assert_eq!(level.blocks[30], BlockSpec::new(19 * 96, 704, 96));

        // Raised step and floating block
        assert_eq!(level.blocks[31], BlockSpec::new(0, 608, 96));
        assert_eq!(level.blocks[32], BlockSpec::new(288, 416, 96));
        assert_eq!(level.player_start, (100, 100));
    }

    #[test]
    fn test_build_blocks() {
        let level = Level {
            name: String::new(),
            player_start: (0, 0),
            blocks: vec![BlockSpec::new(5, 6, 10)],
        };
        let blocks = level.build_blocks();
        assert_eq!(blocks[0].rect, Rect::new(5, 6, 10, 10));
    }
}
