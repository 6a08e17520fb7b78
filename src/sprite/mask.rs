//! Pixel-perfect collision masks
//!
//! A mask records which pixels of a sprite are solid. Two sprites collide
//! when their rectangles overlap AND at least one solid pixel of each
//! lands on the same screen position.

use image::RgbaImage;

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// Solid-pixel bitmap, row major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Fully solid mask (used for plain rectangles)
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build from the alpha channel of an image
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let bits = image.pixels().map(|p| p.0[3] > ALPHA_THRESHOLD).collect();
        Self {
            width: image.width(),
            height: image.height(),
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Check for any shared solid pixel when `other`'s top-left corner
    /// sits at `(dx, dy)` relative to this mask's top-left corner.
    pub fn overlaps(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 4x4 image with only the right half opaque
    fn half_solid() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, _| {
            if x >= 2 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn test_from_rgba() {
        let mask = Mask::from_rgba(&half_solid());
        assert_eq!(mask.count(), 8);
        assert!(!mask.get(0, 0));
        assert!(mask.get(3, 3));
        assert!(!mask.get(4, 0));
    }

    #[test]
    fn test_alpha_threshold_boundary() {
        let image = RgbaImage::from_fn(4, 1, |x, _| Rgba([0, 0, 0, [126, 127, 128, 129][x as usize]]));
        let mask = Mask::from_rgba(&image);
        assert!(!mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(mask.get(2, 0));
        assert!(mask.get(3, 0));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_overlap_respects_transparency() {
        let a = Mask::from_rgba(&half_solid());
        let b = Mask::filled(2, 2);

        // b over the transparent left half of a
        assert!(!a.overlaps(&b, 0, 0));
        // b over the solid right half
        assert!(a.overlaps(&b, 2, 1));
        // b entirely outside
        assert!(!a.overlaps(&b, 4, 0));
        // partially outside on the left, still only transparent pixels
        assert!(!a.overlaps(&b, -1, 0));
    }

    #[test]
    fn test_overlap_negative_offset() {
        let a = Mask::filled(4, 4);
        let b = Mask::filled(4, 4);
        assert!(a.overlaps(&b, -3, -3));
        assert!(!a.overlaps(&b, -4, 0));
    }
}
