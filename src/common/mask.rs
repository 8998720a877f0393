//! Silhouette masks: the fine collision tier.
//!
//! Obstacle resolution uses plain rectangles. Damage uses masks: two sprites touch only
//! where their opaque pixels, placed at their current rectangles, share at least one pixel.

use bevy::prelude::*;

/// Alpha values above this count as opaque.
pub const ALPHA_THRESHOLD: u8 = 127;

/// One bit per pixel, row-major, `true` = opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, bits: vec![false; (width * height) as usize] }
    }

    pub fn filled(width: u32, height: u32) -> Self {
        Self { width, height, bits: vec![true; (width * height) as usize] }
    }

    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let bits = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| opaque(x, y))
            .collect();
        Self { width, height, bits }
    }

    /// Build from one alpha byte per pixel.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        assert_eq!(alpha.len(), (width * height) as usize, "alpha plane does not match mask size");
        Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > ALPHA_THRESHOLD).collect(),
        }
    }

    /// Opaque ellipse inscribed in the mask bounds.
    pub fn ellipse(width: u32, height: u32) -> Self {
        let radii = Vec2::new(width as f32, height as f32) * 0.5;
        Self::from_fn(width, height, |x, y| {
            let p = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - radii) / radii;
            p.length_squared() <= 1.0
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        debug_assert!(x < self.width && y < self.height);
        self.bits[(y * self.width + x) as usize] = opaque;
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Does `other`, placed at `offset` relative to our top-left, share an opaque pixel?
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (self.width as i32).min(offset.x + other.width as i32);
        let y1 = (self.height as i32).min(offset.y + other.height as i32);

        (y0..y1).any(|y| {
            (x0..x1).any(|x| {
                self.get(x as u32, y as u32) && other.get((x - offset.x) as u32, (y - offset.y) as u32)
            })
        })
    }

    pub fn flipped_x(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| self.get(self.width - 1 - x, y))
    }

    /// Rotate counter-clockwise (as seen on screen) by `degrees`, growing the bounds to
    /// fit. Sampling is nearest-neighbour around the center.
    pub fn rotated(&self, degrees: f32) -> Self {
        let out = rotated_extent(self.size(), degrees);
        let (w, h) = (out.x as u32, out.y as u32);
        let (sin, cos) = degrees.to_radians().sin_cos();
        let src_half = self.size() * 0.5;
        let out_half = out * 0.5;

        Self::from_fn(w, h, |x, y| {
            let o = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - out_half;
            // Inverse of the y-down counter-clockwise rotation.
            let s = Vec2::new(o.x * cos - o.y * sin, o.x * sin + o.y * cos) + src_half;
            s.x >= 0.0 && s.y >= 0.0 && self.get(s.x as u32, s.y as u32)
        })
    }
}

/// Pixel size of the bounding box of a `size` rectangle rotated by `degrees`.
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let w = size.x * cos.abs() + size.y * sin.abs();
    let h = size.x * sin.abs() + size.y * cos.abs();
    // Trig noise at multiples of 90 degrees must not add a pixel.
    Vec2::new((w - 1e-3).ceil().max(0.0), (h - 1e-3).ceil().max(0.0))
}

/// Fine overlap test between two masks drawn at the top-left of their rectangles.
pub fn masks_collide(a: &Mask, a_rect: Rect, b: &Mask, b_rect: Rect) -> bool {
    let offset = b_rect.min.floor().as_ivec2() - a_rect.min.floor().as_ivec2();
    a.overlaps(b, offset)
}
