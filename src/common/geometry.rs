//! Rectangle helpers and the axis-separated collision resolver.
//!
//! World space is screen-like: `x` grows to the right, `y` grows *downwards*.
//! A `Rect` therefore reads as `min = top-left`, `max = bottom-right`.
//!
//! ```text
//!   step.x applied ──► clamp against every overlapping obstacle (x only)
//!   step.y applied ──► clamp against every overlapping obstacle (y only)
//! ```
//!
//! Resolving the horizontal pass completely before the vertical one lets bodies slide
//! along walls. Fast bodies can still clip a corner; the fixed tick keeps steps small.

use bevy::prelude::*;

/// Tolerance used when checking that a heading is unit length.
pub const UNIT_EPSILON: f32 = 1e-3;

/// Strict overlap: rectangles that only share an edge do not collide.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// A rectangle with no area cannot take part in collision queries.
#[inline]
pub fn is_degenerate(rect: Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
}

/// Shrink `rect` by `amount` in total on each axis, keeping the center.
///
/// `amount` is the total reduction, so `(60, 90)` removes 30px from the left and right
/// and 45px from the top and bottom.
pub fn deflate(rect: Rect, amount: Vec2) -> Rect {
    debug_assert!(amount.x >= 0.0 && amount.y >= 0.0, "deflate amount must be non-negative");
    let size = (rect.size() - amount).max(Vec2::ZERO);
    Rect::from_center_size(rect.center(), size)
}

#[inline]
pub fn translate(rect: Rect, by: Vec2) -> Rect {
    Rect::from_corners(rect.min + by, rect.max + by)
}

#[inline]
pub fn with_center(rect: Rect, center: Vec2) -> Rect {
    Rect::from_center_size(center, rect.size())
}

#[inline]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.min.x <= inner.min.x
        && outer.min.y <= inner.min.y
        && outer.max.x >= inner.max.x
        && outer.max.y >= inner.max.y
}

/// `true` for the zero vector and for unit vectors.
#[inline]
pub fn is_heading(v: Vec2) -> bool {
    v == Vec2::ZERO || (v.length() - 1.0).abs() <= UNIT_EPSILON
}

/// Normalize a raw input or target delta into a heading.
#[inline]
pub fn heading_from(raw: Vec2) -> Vec2 {
    let heading = raw.normalize_or_zero();
    debug_assert!(is_heading(heading));
    heading
}

/// Move `hitbox` by `heading * distance`, resolving each axis against `obstacles`.
///
/// The clamp direction follows the sign of `heading` on that axis: moving right snaps
/// the right edge to the obstacle's left edge, moving up snaps the top edge to the
/// obstacle's bottom edge, and so on. Overlapping obstacles are visited in slice order.
pub fn resolve_axis_separated(hitbox: Rect, heading: Vec2, distance: f32, obstacles: &[Rect]) -> Rect {
    debug_assert!(is_heading(heading), "heading must be zero or unit length: {heading:?}");

    let mut rect = translate(hitbox, Vec2::new(heading.x * distance, 0.0));
    for obstacle in obstacles {
        debug_assert!(!is_degenerate(*obstacle), "degenerate obstacle {obstacle:?}");
        if !overlaps(rect, *obstacle) {
            continue;
        }
        if heading.x > 0.0 {
            rect = translate(rect, Vec2::new(obstacle.min.x - rect.max.x, 0.0));
        } else if heading.x < 0.0 {
            rect = translate(rect, Vec2::new(obstacle.max.x - rect.min.x, 0.0));
        }
    }

    rect = translate(rect, Vec2::new(0.0, heading.y * distance));
    for obstacle in obstacles {
        if !overlaps(rect, *obstacle) {
            continue;
        }
        if heading.y > 0.0 {
            rect = translate(rect, Vec2::new(0.0, obstacle.min.y - rect.max.y));
        } else if heading.y < 0.0 {
            rect = translate(rect, Vec2::new(0.0, obstacle.max.y - rect.min.y));
        }
    }

    rect
}

/// Step a body: resolve its hitbox, then re-center its visual bounds on the result.
///
/// Returns `(bounds, hitbox)`.
pub fn move_body(bounds: Rect, hitbox: Rect, heading: Vec2, distance: f32, obstacles: &[Rect]) -> (Rect, Rect) {
    let hitbox = resolve_axis_separated(hitbox, heading, distance, obstacles);
    (with_center(bounds, hitbox.center()), hitbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        assert!(!overlaps(rect(0.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 10.0, 10.0)));
        assert!(overlaps(rect(0.0, 0.0, 10.0, 10.0), rect(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn deflate_keeps_center_and_stays_inside() {
        let outer = rect(100.0, 100.0, 96.0, 128.0);
        let inner = deflate(outer, Vec2::new(60.0, 90.0));
        assert_eq!(inner.center(), outer.center());
        assert_eq!(inner.size(), Vec2::new(36.0, 38.0));
        assert!(contains_rect(outer, inner));
    }

    #[test]
    fn normalized_headings_are_unit_or_zero() {
        for raw in [
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-380.0, 212.5),
            Vec2::new(0.001, -0.002),
        ] {
            assert!((heading_from(raw).length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(heading_from(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn moving_right_into_wall_snaps_right_edge_to_wall() {
        let hitbox = rect(0.0, 0.0, 10.0, 10.0);
        let wall = rect(15.0, -50.0, 20.0, 100.0);

        let out = resolve_axis_separated(hitbox, Vec2::X, 8.0, &[wall]);

        assert_eq!(out.max.x, wall.min.x);
        assert_eq!(out.min.y, 0.0);
        assert_eq!(out.max.y, 10.0);
    }

    #[test]
    fn moving_left_and_up_snap_to_trailing_edges() {
        let left_wall = rect(-30.0, -50.0, 25.0, 100.0);
        let out = resolve_axis_separated(rect(0.0, 0.0, 10.0, 10.0), Vec2::NEG_X, 8.0, &[left_wall]);
        assert_eq!(out.min.x, left_wall.max.x);

        let ceiling = rect(-50.0, -30.0, 100.0, 25.0);
        let out = resolve_axis_separated(rect(0.0, 0.0, 10.0, 10.0), Vec2::NEG_Y, 8.0, &[ceiling]);
        assert_eq!(out.min.y, ceiling.max.y);
        assert_eq!(out.min.x, 0.0);
    }

    #[test]
    fn diagonal_motion_slides_along_wall() {
        let wall = rect(12.0, -100.0, 20.0, 300.0);
        let heading = Vec2::new(1.0, 1.0).normalize();

        let out = resolve_axis_separated(rect(0.0, 0.0, 10.0, 10.0), heading, 10.0, &[wall]);

        assert_eq!(out.max.x, wall.min.x);
        assert!((out.min.y - heading.y * 10.0).abs() < 1e-5);
    }

    #[test]
    fn free_motion_is_plain_translation() {
        let out = resolve_axis_separated(rect(0.0, 0.0, 10.0, 10.0), Vec2::Y, 4.0, &[rect(100.0, 100.0, 5.0, 5.0)]);
        assert_eq!(out, rect(0.0, 4.0, 10.0, 10.0));
    }

    #[test]
    fn zero_heading_does_not_move() {
        let hitbox = rect(3.0, 4.0, 10.0, 10.0);
        assert_eq!(resolve_axis_separated(hitbox, Vec2::ZERO, 50.0, &[]), hitbox);
    }
}
