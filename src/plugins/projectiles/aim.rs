//! Aim math shared by the gun and its bullets.
//!
//! Angles are measured on screen (y down), so a positive `aim_angle` turns clockwise.
//! Artwork points right. For targets in the left half-plane the angle is folded with
//! `-180 - angle` and the art is mirrored, which keeps the sprite upright and the
//! rotation continuous as the pointer crosses the vertical axis.
//!
//! ```text
//!   direction (1, 0)  -> angle    0, rotation    0, mirrored false
//!   direction (0, 1)  -> angle   90, rotation  -90, mirrored false   (points down)
//!   direction (-1, 0) -> angle -360, rotation  360, mirrored true    (points left)
//! ```

use bevy::prelude::*;

use crate::common::geometry::heading_from;
use crate::common::mask::{rotated_extent, Mask};

/// Unit direction from `pivot` toward `pointer`, or zero when they coincide.
#[inline]
pub fn aim_direction(pointer: Vec2, pivot: Vec2) -> Vec2 {
    heading_from(pointer - pivot)
}

/// Aim angle in degrees, folded for leftward directions.
pub fn aim_angle(direction: Vec2) -> f32 {
    let angle = direction.y.atan2(direction.x).to_degrees();
    if direction.x < 0.0 {
        -180.0 - angle
    } else {
        angle
    }
}

/// How right-pointing artwork is presented for a given direction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Counter-clockwise rotation on screen, in degrees. Applied before mirroring.
    pub rotation: f32,
    pub mirrored: bool,
}

impl Pose {
    pub fn from_direction(direction: Vec2) -> Self {
        Self { rotation: -aim_angle(direction), mirrored: direction.x < 0.0 }
    }

    /// Bounding box of `art_size` in this pose, centered on `center`.
    pub fn rect(&self, center: Vec2, art_size: Vec2) -> Rect {
        Rect::from_center_size(center, rotated_extent(art_size, self.rotation))
    }

    /// The artwork's opaque footprint in this pose.
    pub fn mask(&self, mask: &Mask) -> Mask {
        let rotated = mask.rotated(self.rotation);
        if self.mirrored { rotated.flipped_x() } else { rotated }
    }
}
