//! Collision System
//!
//! Pixel-perfect collision between the player and terrain blocks, resolved
//! one axis at a time:
//! 1. Horizontal: probe a short distance to each side before moving, and
//!    simply refuse to walk into anything found there
//! 2. Vertical: after moving, snap onto the top of (or below) every block
//!    the player overlaps, depending on the direction of travel

use crate::geom::Rect;
use crate::level::Block;
use crate::sprite::{Mask, SpriteSheets};
use super::player::Player;

/// Something that can collide: a rectangle with an optional pixel mask.
/// Without a mask the whole rectangle is solid.
#[derive(Debug, Clone, Copy)]
pub struct Collider<'a> {
    pub rect: Rect,
    pub mask: Option<&'a Mask>,
}

impl<'a> Collider<'a> {
    pub fn new(rect: Rect, mask: Option<&'a Mask>) -> Self {
        // A mask that doesn't match the rectangle would sample the wrong pixels
        let mask = mask.filter(|m| m.width() as i32 == rect.w && m.height() as i32 == rect.h);
        Self { rect, mask }
    }

    /// Rectangle overlap refined by masks
    pub fn overlaps(&self, other: &Collider) -> bool {
        if !self.rect.intersects(&other.rect) {
            return false;
        }
        let dx = other.rect.x - self.rect.x;
        let dy = other.rect.y - self.rect.y;
        match (self.mask, other.mask) {
            (Some(a), Some(b)) => a.overlaps(b, dx, dy),
            (Some(a), None) => a.overlaps(&Mask::filled(other.rect.w as u32, other.rect.h as u32), dx, dy),
            (None, Some(b)) => b.overlaps(&Mask::filled(self.rect.w as u32, self.rect.h as u32), -dx, -dy),
            (None, None) => true,
        }
    }
}

/// Terrain blocks with the shared tile mask
pub struct Terrain<'a> {
    pub blocks: &'a [Block],
    pub tile_mask: Option<&'a Mask>,
}

impl<'a> Terrain<'a> {
    pub fn collider(&self, block: &Block) -> Collider<'a> {
        Collider::new(block.rect, self.tile_mask)
    }
}

fn player_collider<'a>(player: &Player, sheets: &'a SpriteSheets) -> Collider<'a> {
    Collider::new(player.rect, player.mask(sheets))
}

/// Does the player overlap this block?
pub fn collide(player: &Player, sheets: &SpriteSheets, terrain: &Terrain, block: &Block) -> bool {
    player_collider(player, sheets).overlaps(&terrain.collider(block))
}

/// Index of the first block the player would overlap after shifting by `(dx, dy)`.
/// The player is left where it was.
pub fn probe(player: &mut Player, sheets: &SpriteSheets, terrain: &Terrain, dx: i32, dy: i32) -> Option<usize> {
    player.move_by(dx, dy);
    let hit = terrain
        .blocks
        .iter()
        .position(|block| collide(player, sheets, terrain, block));
    player.move_by(-dx, -dy);
    hit
}

/// Index of the first block in the way of a horizontal move by `dx`
pub fn probe_horizontal(player: &mut Player, sheets: &SpriteSheets, terrain: &Terrain, dx: i32) -> Option<usize> {
    probe(player, sheets, terrain, dx, 0)
}

/// Push the player out of every block it overlaps along the vertical axis.
///
/// Moving down lands on the block's top; moving up bumps the block's
/// underside and reverses vertical speed. Blocks are handled in order, so
/// once the first one moves the player clear the rest usually no longer
/// overlap. Returns the indices of the blocks that were resolved.
pub fn resolve_vertical(player: &mut Player, sheets: &SpriteSheets, terrain: &Terrain, dy: f32) -> Vec<usize> {
    let mut collided = Vec::new();
    for (i, block) in terrain.blocks.iter().enumerate() {
        if !collide(player, sheets, terrain, block) {
            continue;
        }
        if dy > 0.0 {
            player.rect.set_bottom(block.rect.top());
            player.landed();
        } else if dy < 0.0 {
            player.rect.set_top(block.rect.bottom());
            player.hit_head();
        }
        collided.push(i);
    }
    collided
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use crate::sprite::SpriteFrame;

    fn floor() -> Vec<Block> {
        vec![
            Block { rect: Rect::new(0, 100, 50, 50) },
            Block { rect: Rect::new(50, 100, 50, 50) },
        ]
    }

    #[test]
    fn test_collider_without_masks() {
        let a = Collider::new(Rect::new(0, 0, 10, 10), None);
        let b = Collider::new(Rect::new(5, 5, 10, 10), None);
        let c = Collider::new(Rect::new(10, 0, 10, 10), None);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_mismatched_mask_is_ignored() {
        let mask = Mask::filled(3, 3);
        let collider = Collider::new(Rect::new(0, 0, 10, 10), Some(&mask));
        assert!(collider.mask.is_none());
    }

    #[test]
    fn test_transparent_pixels_do_not_collide() {
        // Player sprite with a transparent bottom half
        let image = RgbaImage::from_fn(10, 10, |_, y| {
            if y < 5 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 0, 0]) }
        });
        let frame = SpriteFrame::new(image);
        let player = Collider::new(Rect::new(0, 0, 10, 10), Some(&frame.mask));

        // Block overlapping only the transparent rows
        let low = Collider::new(Rect::new(0, 7, 10, 10), None);
        assert!(!player.overlaps(&low));
        assert!(!low.overlaps(&player));

        let high = Collider::new(Rect::new(0, 4, 10, 10), None);
        assert!(player.overlaps(&high));
        assert!(high.overlaps(&player));
    }

    #[test]
    fn test_resolve_landing() {
        let blocks = floor();
        let terrain = Terrain { blocks: &blocks, tile_mask: None };
        let sheets = SpriteSheets::new();
        let mut player = Player::new(30, 60, 40, 50);
        player.y_velocity = 7.0;
        player.jump_count = 2;

        let hits = resolve_vertical(&mut player, &sheets, &terrain, 7.0);
        assert_eq!(hits, vec![0]);
        assert_eq!(player.rect.bottom(), 100);
        assert_eq!(player.jump_count, 0);
        assert_eq!(player.y_velocity, 0.0);
    }

    #[test]
    fn test_resolve_head_bump() {
        let blocks = vec![Block { rect: Rect::new(0, 0, 50, 50) }];
        let terrain = Terrain { blocks: &blocks, tile_mask: None };
        let sheets = SpriteSheets::new();
        let mut player = Player::new(10, 45, 20, 20);
        player.y_velocity = -6.0;

        let hits = resolve_vertical(&mut player, &sheets, &terrain, -6.0);
        assert_eq!(hits, vec![0]);
        assert_eq!(player.rect.top(), 50);
        assert_eq!(player.y_velocity, 6.0);
    }

    #[test]
    fn test_no_vertical_motion_leaves_player() {
        let blocks = floor();
        let terrain = Terrain { blocks: &blocks, tile_mask: None };
        let sheets = SpriteSheets::new();
        let mut player = Player::new(30, 60, 40, 50);

        let hits = resolve_vertical(&mut player, &sheets, &terrain, 0.0);
        assert_eq!(hits, vec![0, 1]);
        assert_eq!(player.rect.y, 60);
    }

    #[test]
    fn test_probe_restores_position() {
        let blocks = vec![Block { rect: Rect::new(100, 0, 50, 50) }];
        let terrain = Terrain { blocks: &blocks, tile_mask: None };
        let sheets = SpriteSheets::new();
        let mut player = Player::new(45, 0, 50, 50);

        assert_eq!(probe_horizontal(&mut player, &sheets, &terrain, 10), Some(0));
        assert_eq!(probe_horizontal(&mut player, &sheets, &terrain, -10), None);
        assert_eq!(player.rect.x, 45);
    }
}
