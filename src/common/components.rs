//! Capability components shared by every simulated entity.
//!
//! An entity is a bag of capabilities rather than a class: anything with `Bounds` can be
//! drawn, anything with a `Hitbox` collides with obstacles, anything with a
//! `CollisionMask` takes part in damage queries.

use std::sync::Arc;

use bevy::prelude::*;

use super::mask::Mask;

/// Visual rectangle in world space (y down). Drawn at its top-left.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Bounds(pub Rect);

/// Deflated rectangle used against obstacles. Always inside `Bounds`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Hitbox(pub Rect);

/// Zero or unit direction of travel.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct Heading(pub Vec2);

/// Pixels per second along `Heading`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref)]
pub struct Speed(pub f32);

/// Opaque-pixel footprint currently drawn at `Bounds.min`.
#[derive(Component, Debug, Clone, Deref)]
pub struct CollisionMask(pub Arc<Mask>);

/// Which compositor tier an entity is drawn in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layering {
    /// Static ground, always drawn first.
    Ground,
    /// Everything that lives above the ground.
    Sortable,
}

/// Monotonic creation order; the natural collection order of the scene.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnSeq(pub u64);

/// Hands out `SpawnSeq` values.
#[derive(Resource, Debug, Default)]
pub struct SpawnSequence {
    next: u64,
}

impl SpawnSequence {
    pub fn next(&mut self) -> SpawnSeq {
        let seq = SpawnSeq(self.next);
        self.next += 1;
        seq
    }
}

/// Inert collision geometry.
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle;

/// The shared, static obstacle set every mover resolves against.
#[derive(Resource, Debug, Default, Clone, Deref)]
pub struct Obstacles(pub Vec<Rect>);

/// The one controllable character, cached at world load.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CharacterEntity(pub Entity);
