//! Horizontal scrolling camera
//!
//! The view only scrolls while the player is walking inside the band of
//! `scroll_area_width` pixels at either screen edge, in the direction of
//! that edge. It then moves exactly as fast as the player.

use crate::geom::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Camera {
    /// World x shown at the left screen edge
    pub offset_x: i32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a world x to a screen x
    pub fn to_screen(&self, x: i32) -> i32 {
        x - self.offset_x
    }

    /// Scroll to keep the player out of the edge bands
    pub fn follow(&mut self, player: &Rect, x_velocity: f32, screen_width: i32, scroll_area_width: i32) {
        let near_right = self.to_screen(player.right()) >= screen_width - scroll_area_width;
        let near_left = self.to_screen(player.left()) <= scroll_area_width;
        if (near_right && x_velocity > 0.0) || (near_left && x_velocity < 0.0) {
            self.offset_x += x_velocity as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolls_near_right_edge() {
        let mut camera = Camera::new();
        let player = Rect::new(750, 0, 64, 64);

        camera.follow(&player, 5.0, 1000, 200);
        assert_eq!(camera.offset_x, 5);

        // Not moving: no scroll
        camera.follow(&player, 0.0, 1000, 200);
        assert_eq!(camera.offset_x, 5);

        // Moving left while at the right edge: no scroll
        camera.follow(&player, -5.0, 1000, 200);
        assert_eq!(camera.offset_x, 5);
    }

    #[test]
    fn test_scrolls_near_left_edge() {
        let mut camera = Camera::new();
        let player = Rect::new(150, 0, 64, 64);
        camera.follow(&player, -5.0, 1000, 200);
        assert_eq!(camera.offset_x, -5);
        assert_eq!(camera.to_screen(150), 155);
    }

    #[test]
    fn test_middle_of_screen_does_not_scroll() {
        let mut camera = Camera::new();
        let player = Rect::new(400, 0, 64, 64);
        camera.follow(&player, 5.0, 1000, 200);
        camera.follow(&player, -5.0, 1000, 200);
        assert_eq!(camera.offset_x, 0);
    }
}
