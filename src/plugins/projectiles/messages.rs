//! Buffered spawn requests.
//!
//! The gun only creates *intent*; the bullet consumer is the single place bullets are
//! built. This is a producer -> queue -> consumer pipeline.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnBulletRequest {
    /// Visual center of the shooter at the moment of firing.
    pub origin: Vec2,
    /// Unit aim direction.
    pub heading: Vec2,
}
